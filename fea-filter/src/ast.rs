//! The statement tree produced by the parser.
//!
//! Only what the filter needs is modeled: statements that can reference
//! glyphs keep their glyph references as structured items, everything else
//! is carried as normalized text.

use std::fmt::{self, Display};
use std::ops::Range;

/// One top-level or block-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `languagesystem <script> <language>;`
    LanguageSystem { script: String, language: String },
    /// `@name = [ ... ];`
    GlyphClassDef(GlyphClassDef),
    /// `markClass <glyphs> <anchor> @name;`
    MarkClass(MarkClassDef),
    /// A `sub` or `pos` rule.
    Rule(Rule),
    /// `feature <tag> { ... } <tag>;`
    Feature(Block),
    /// `lookup <name> { ... } <name>;`
    Lookup(Block),
    /// `table <tag> { ... } <tag>;`
    Table(Table),
    /// `lookupflag ...;`
    LookupFlag(LookupFlag),
    /// Any other statement, passed through as normalized text (without `;`).
    Raw(String),
    /// A lone `;`.
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphClassDef {
    /// The class name, including the leading `@`.
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkClassDef {
    pub glyphs: Item,
    /// The anchor, as written (e.g. `<anchor 50 450>`).
    pub anchor: String,
    /// The mark class name, including the leading `@`.
    pub class: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: String,
    pub use_extension: bool,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    /// Each statement of the table body, normalized, without `;`.
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupFlag {
    /// The statement, normalized, without `;`.
    pub text: String,
    /// Classes and glyphs named by `MarkAttachmentType` or
    /// `UseMarkFilteringSet`.
    pub references: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Sub,
    Pos,
}

/// A substitution or positioning rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub kind: RuleKind,
    /// The statement began with `enum`/`enumerate`.
    pub enumerated: bool,
    /// The statement began with `ignore`.
    pub ignore: bool,
    pub items: Vec<Item>,
    /// Position of the rule in the source.
    pub range: Range<usize>,
}

/// One element of a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Glyph { name: String, marked: bool },
    Class { name: String, marked: bool },
    InlineClass { members: Vec<String>, marked: bool },
    /// A keyword such as `by`, `mark` or `base`.
    Keyword(String),
    /// A number, a value record or an anchor, as written.
    Value(String),
    /// `lookup <name>` inside a contextual rule.
    LookupRef(String),
}

impl Rule {
    /// Every glyph or class name the rule references, inline classes
    /// flattened, with contextual marks dropped.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.items.iter().flat_map(Item::references)
    }

    pub fn describe(&self) -> &'static str {
        match self.kind {
            RuleKind::Sub => "Substitution",
            RuleKind::Pos => "Positioning",
        }
    }
}

impl Item {
    pub fn references(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Item::Glyph { name, .. } | Item::Class { name, .. } => {
                Box::new(std::iter::once(name.as_str()))
            }
            Item::InlineClass { members, .. } => Box::new(
                members
                    .iter()
                    .map(String::as_str)
                    .filter(|member| *member != "-"),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }

    pub(crate) fn is_marked(&self) -> bool {
        matches!(
            self,
            Item::Glyph { marked: true, .. }
                | Item::Class { marked: true, .. }
                | Item::InlineClass { marked: true, .. }
        )
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_marked() { "'" } else { "" };
        match self {
            Item::Glyph { name, .. } | Item::Class { name, .. } => write!(f, "{name}{mark}"),
            Item::InlineClass { members, .. } => write!(f, "[{}]{mark}", members.join(" ")),
            Item::Keyword(word) | Item::Value(word) => f.write_str(word),
            Item::LookupRef(name) => write!(f, "lookup {name}"),
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ignore {
            f.write_str("ignore ")?;
        }
        if self.enumerated {
            f.write_str("enum ")?;
        }
        match self.kind {
            RuleKind::Sub => f.write_str("sub")?,
            RuleKind::Pos => f.write_str("pos")?,
        }
        for item in &self.items {
            write!(f, " {item}")?;
        }
        f.write_str(";")
    }
}

impl Display for GlyphClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = [{}];", self.name, self.members.join(" "))
    }
}

impl Display for MarkClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "markClass {} {} {};", self.glyphs, self.anchor, self.class)
    }
}
