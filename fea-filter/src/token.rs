use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Token {
    pub(crate) len: usize,
    pub(crate) kind: Kind,
}

/// A token plus its position in the source.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub(crate) kind: Kind,
    pub(crate) range: Range<usize>,
    // trivia (whitespace or comments) came before this token
    pub(crate) after_trivia: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Eof, // the end of the input stream

    // a name or any other block of non-whitespace that isn't a keyword.
    Ident,
    // @name
    NamedGlyphClass,

    String,
    StringUnterminated, // an error handled at a higher level
    Number,             // may be negative
    Float,

    Whitespace,
    Comment,

    // special symbols
    Semi,
    Comma,
    Backslash,
    Hyphen,
    Eq,
    LBrace,
    RBrace,
    LSquare,
    RSquare,
    LParen,
    RParen,
    LAngle,
    RAngle,
    SingleQuote,

    // top-level keywords
    TableKw,
    LookupKw,
    LanguagesystemKw,
    AnchorDefKw,
    FeatureKw,
    MarkClassKw,
    AnonKw,
    ValueRecordDefKw,

    // other keywords
    AnchorKw,
    BaseKw,
    ByKw,
    CursiveKw,
    EnumKw,
    FromKw,
    IgnoreKw,
    IncludeKw,
    LanguageKw,
    LigatureKw,
    LookupflagKw,
    MarkKw,
    NullKw,
    PosKw,
    RsubKw,
    ScriptKw,
    SubKw,
    SubtableKw,
    UseExtensionKw,
}

impl Kind {
    pub(crate) fn from_keyword(word: &[u8]) -> Option<Kind> {
        match word {
            b"anchor" => Some(Kind::AnchorKw),
            b"anchorDef" => Some(Kind::AnchorDefKw),
            b"anon" | b"anonymous" => Some(Kind::AnonKw),
            b"base" => Some(Kind::BaseKw),
            b"by" => Some(Kind::ByKw),
            b"cursive" => Some(Kind::CursiveKw),
            b"enum" | b"enumerate" => Some(Kind::EnumKw),
            b"feature" => Some(Kind::FeatureKw), //(used as a block and as a statement);
            b"from" => Some(Kind::FromKw),
            b"ignore" => Some(Kind::IgnoreKw), //(used with substitute and position);
            b"include" => Some(Kind::IncludeKw),
            b"language" => Some(Kind::LanguageKw),
            b"languagesystem" => Some(Kind::LanguagesystemKw),
            b"ligature" => Some(Kind::LigatureKw),
            b"lookup" => Some(Kind::LookupKw),
            b"lookupflag" => Some(Kind::LookupflagKw),
            b"mark" => Some(Kind::MarkKw),
            b"markClass" => Some(Kind::MarkClassKw),
            b"NULL" => Some(Kind::NullKw), //(used in substitute, device, value record, anchor);
            b"pos" | b"position" => Some(Kind::PosKw),
            b"reversesub" | b"rsub" => Some(Kind::RsubKw),
            b"script" => Some(Kind::ScriptKw),
            b"substitute" | b"sub" => Some(Kind::SubKw),
            b"subtable" => Some(Kind::SubtableKw),
            b"table" => Some(Kind::TableKw),
            b"useExtension" => Some(Kind::UseExtensionKw),
            b"valueRecordDef" => Some(Kind::ValueRecordDefKw),
            _ => None,
        }
    }

    pub(crate) fn is_trivia(self) -> bool {
        matches!(self, Kind::Whitespace | Kind::Comment)
    }

    pub(crate) fn is_keyword(self) -> bool {
        matches!(
            self,
            Kind::TableKw
                | Kind::LookupKw
                | Kind::LanguagesystemKw
                | Kind::AnchorDefKw
                | Kind::FeatureKw
                | Kind::MarkClassKw
                | Kind::AnonKw
                | Kind::ValueRecordDefKw
                | Kind::AnchorKw
                | Kind::BaseKw
                | Kind::ByKw
                | Kind::CursiveKw
                | Kind::EnumKw
                | Kind::FromKw
                | Kind::IgnoreKw
                | Kind::IncludeKw
                | Kind::LanguageKw
                | Kind::LigatureKw
                | Kind::LookupflagKw
                | Kind::MarkKw
                | Kind::NullKw
                | Kind::PosKw
                | Kind::RsubKw
                | Kind::ScriptKw
                | Kind::SubKw
                | Kind::SubtableKw
                | Kind::UseExtensionKw
        )
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Eof => write!(f, "EOF"),
            Self::Ident => write!(f, "ID"),
            Self::NamedGlyphClass => write!(f, "@GlyphClass"),
            Self::StringUnterminated => write!(f, "STR OPEN"),
            Self::String => write!(f, "STR"),
            Self::Number => write!(f, "NUM"),
            Self::Float => write!(f, "FLOAT"),
            Self::Whitespace => write!(f, "WS"),
            Self::Comment => write!(f, "#"),
            Self::Semi => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::Backslash => write!(f, "\\"),
            Self::Hyphen => write!(f, "-"),
            Self::Eq => write!(f, "="),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::LSquare => write!(f, "["),
            Self::RSquare => write!(f, "]"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LAngle => write!(f, "<"),
            Self::RAngle => write!(f, ">"),
            Self::SingleQuote => write!(f, "'"),

            Self::TableKw => write!(f, "TableKw"),
            Self::LookupKw => write!(f, "LookupKw"),
            Self::LanguagesystemKw => write!(f, "LanguagesystemKw"),
            Self::AnchorDefKw => write!(f, "AnchorDefKw"),
            Self::FeatureKw => write!(f, "FeatureKw"),
            Self::MarkClassKw => write!(f, "MarkClassKw"),
            Self::AnonKw => write!(f, "AnonKw"),
            Self::ValueRecordDefKw => write!(f, "ValueRecordDefKw"),
            Self::AnchorKw => write!(f, "AnchorKw"),
            Self::BaseKw => write!(f, "BaseKw"),
            Self::ByKw => write!(f, "ByKw"),
            Self::CursiveKw => write!(f, "CursiveKw"),
            Self::EnumKw => write!(f, "EnumKw"),
            Self::FromKw => write!(f, "FromKw"),
            Self::IgnoreKw => write!(f, "IgnoreKw"),
            Self::IncludeKw => write!(f, "IncludeKw"),
            Self::LanguageKw => write!(f, "LanguageKw"),
            Self::LigatureKw => write!(f, "LigatureKw"),
            Self::LookupflagKw => write!(f, "LookupflagKw"),
            Self::MarkKw => write!(f, "MarkKw"),
            Self::NullKw => write!(f, "NullKw"),
            Self::PosKw => write!(f, "PosKw"),
            Self::RsubKw => write!(f, "RsubKw"),
            Self::ScriptKw => write!(f, "ScriptKw"),
            Self::SubKw => write!(f, "SubKw"),
            Self::SubtableKw => write!(f, "SubtableKw"),
            Self::UseExtensionKw => write!(f, "UseExtensionKw"),
        }
    }
}
