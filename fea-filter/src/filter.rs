//! Re-emit a statement tree, dropping whatever references undefined names.

use std::collections::HashSet;

use log::{debug, warn};

use crate::{
    ast::{Block, GlyphClassDef, LookupFlag, MarkClassDef, Rule, Statement, Table},
    diagnostic::{Diagnostic, DiagnosticKind},
    error::Error,
    parse::parse,
};

const INDENT: &str = "    ";

/// The result of a filtering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Filtered {
    /// Canonical feature text.
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
    /// The reference set as it stood at the end of the pass: the initial
    /// glyph names plus every class that was defined.
    pub refs: HashSet<String>,
}

/// Parse `text` and re-emit it, keeping only statements whose references
/// are all in `refs` at the point they appear.
pub fn validate(text: &str, refs: HashSet<String>) -> Result<Filtered, Error> {
    let statements = parse(text)?;
    let mut writer = FilterWriter::new(refs);
    writer.write_statements(&statements);
    Ok(writer.finish())
}

/// Output lines plus the names already emitted in this pass.
#[derive(Debug, Default)]
struct FeatureDocument {
    lines: Vec<String>,
    features: HashSet<String>,
    lookups: HashSet<String>,
    tables: HashSet<String>,
    language_systems: HashSet<(String, String)>,
}

impl FeatureDocument {
    fn push(&mut self, depth: usize, line: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", INDENT.repeat(depth), line.as_ref()));
    }

    fn into_text(self) -> String {
        let mut text = self.lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}

/// The innermost block a statement appears in, for messages.
#[derive(Clone, Copy)]
enum Scope<'a> {
    Root,
    Feature(&'a str),
    Lookup(&'a str),
}

impl Scope<'_> {
    fn suffix(&self) -> String {
        match self {
            Scope::Root => String::new(),
            Scope::Feature(name) => format!(" from feature \"{name}\""),
            Scope::Lookup(name) => format!(" from lookup \"{name}\""),
        }
    }
}

/// Walks statements in order, growing the reference set as classes are
/// defined and writing each accepted statement to a [`FeatureDocument`].
pub struct FilterWriter {
    refs: HashSet<String>,
    doc: FeatureDocument,
    diagnostics: Vec<Diagnostic>,
}

impl FilterWriter {
    pub fn new(refs: HashSet<String>) -> Self {
        FilterWriter {
            refs,
            doc: FeatureDocument::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn write_statements(&mut self, statements: &[Statement]) {
        self.write_block(statements, Scope::Root, 0);
    }

    pub fn refs(&self) -> &HashSet<String> {
        &self.refs
    }

    pub fn finish(self) -> Filtered {
        Filtered {
            text: self.doc.into_text(),
            diagnostics: self.diagnostics,
            refs: self.refs,
        }
    }

    fn write_block(&mut self, statements: &[Statement], scope: Scope, depth: usize) {
        for statement in statements {
            self.write_statement(statement, scope, depth);
        }
    }

    fn write_statement(&mut self, statement: &Statement, scope: Scope, depth: usize) {
        match statement {
            Statement::LanguageSystem { script, language } => {
                if self
                    .doc
                    .language_systems
                    .insert((script.clone(), language.clone()))
                {
                    self.doc
                        .push(depth, format!("languagesystem {script} {language};"));
                } else {
                    self.duplicate(format!("languagesystem {script} {language}"));
                }
            }
            Statement::GlyphClassDef(def) => self.class_definition(def, depth),
            Statement::MarkClass(def) => self.mark_class(def, scope, depth),
            Statement::Rule(rule) => self.rule(rule, scope, depth),
            Statement::Feature(block) => {
                if self.doc.features.insert(block.name.clone()) {
                    self.block("feature", block, Scope::Feature(&block.name), depth);
                } else {
                    self.duplicate(format!("feature {}", block.name));
                }
            }
            Statement::Lookup(block) => {
                if self.doc.lookups.insert(block.name.clone()) {
                    self.block("lookup", block, Scope::Lookup(&block.name), depth);
                } else {
                    self.duplicate(format!("lookup {}", block.name));
                }
            }
            Statement::Table(table) => self.table(table, depth),
            Statement::LookupFlag(flag) => self.lookup_flag(flag, scope, depth),
            Statement::Raw(text) => self.doc.push(depth, format!("{text};")),
            Statement::Empty => self.doc.push(depth, ";"),
        }
    }

    fn block(&mut self, keyword: &str, block: &Block, scope: Scope, depth: usize) {
        let extension = if block.use_extension {
            " useExtension"
        } else {
            ""
        };
        self.doc
            .push(depth, format!("{keyword} {}{extension} {{", block.name));
        self.write_block(&block.statements, scope, depth + 1);
        self.doc.push(depth, format!("}} {};", block.name));
    }

    fn table(&mut self, table: &Table, depth: usize) {
        if !self.doc.tables.insert(table.name.clone()) {
            self.duplicate(format!("table {}", table.name));
            return;
        }
        self.doc.push(depth, format!("table {} {{", table.name));
        for line in &table.lines {
            self.doc.push(depth + 1, format!("{line};"));
        }
        self.doc.push(depth, format!("}} {};", table.name));
    }

    fn class_definition(&mut self, def: &GlyphClassDef, depth: usize) {
        if self.refs.contains(&def.name) {
            debug!("Glyph class {} already defined, ignored", def.name);
            return;
        }
        let mut members = Vec::with_capacity(def.members.len());
        for member in &def.members {
            if member == "-" || self.refs.contains(member) {
                members.push(member.clone());
            } else {
                self.undefined(
                    member,
                    format!(
                        "Undefined reference \"{member}\" removed from glyph class definition {}.",
                        def.name
                    ),
                );
            }
        }
        self.refs.insert(def.name.clone());
        let def = GlyphClassDef {
            name: def.name.clone(),
            members,
        };
        self.doc.push(depth, def.to_string());
    }

    fn mark_class(&mut self, def: &MarkClassDef, scope: Scope, depth: usize) {
        if let Some(missing) = self.first_undefined(def.glyphs.references()) {
            let message = format!(
                "Mark class definition with undefined reference \"{missing}\" removed{}.",
                scope.suffix()
            );
            self.undefined(&missing, message);
            self.doc.push(depth, ";");
            return;
        }
        self.refs.insert(def.class.clone());
        self.doc.push(depth, def.to_string());
    }

    fn rule(&mut self, rule: &Rule, scope: Scope, depth: usize) {
        if let Some(missing) = self.first_undefined(rule.references()) {
            let message = format!(
                "{} rule with undefined reference \"{missing}\" removed{}.",
                rule.describe(),
                scope.suffix()
            );
            self.undefined(&missing, message);
            self.doc.push(depth, ";");
            return;
        }
        self.doc.push(depth, rule.to_string());
    }

    fn lookup_flag(&mut self, flag: &LookupFlag, scope: Scope, depth: usize) {
        if let Some(missing) = self.first_undefined(flag.references.iter().map(String::as_str)) {
            let message = format!(
                "Lookup flag with undefined reference \"{missing}\" removed{}.",
                scope.suffix()
            );
            self.undefined(&missing, message);
            self.doc.push(depth, ";");
            return;
        }
        self.doc.push(depth, format!("{};", flag.text));
    }

    fn first_undefined<'a>(&self, references: impl Iterator<Item = &'a str>) -> Option<String> {
        references
            .map(|name| name.trim_end_matches('\''))
            .find(|name| !self.refs.contains(*name))
            .map(str::to_string)
    }

    fn undefined(&mut self, reference: &str, message: String) {
        warn!("{message}");
        self.diagnostics.push(Diagnostic::warning(
            DiagnosticKind::UndefinedReference(reference.to_string()),
            message,
        ));
    }

    fn duplicate(&mut self, what: String) {
        debug!("Duplicate {what} discarded");
        self.diagnostics.push(Diagnostic::info(
            DiagnosticKind::DuplicateDefinition(what.clone()),
            format!("Duplicate {what} discarded."),
        ));
    }
}
