//! Statement-level grammar.
//!
//! Each function expects the parser to be positioned at the first token of
//! the construct it parses, and consumes through its terminating `;`.

use crate::{
    ast::{
        Block, GlyphClassDef, Item, LookupFlag, MarkClassDef, Rule, RuleKind, Statement, Table,
    },
    error::{Error, UnsupportedRule},
    parse::Parser,
    token::Kind,
};

pub(crate) fn root(parser: &mut Parser) -> Result<Vec<Statement>, Error> {
    let mut statements = Vec::new();
    while !parser.at_eof() {
        if parser.matches(0, Kind::RBrace) {
            return Err(parser.err("Unexpected '}'"));
        }
        statements.push(statement(parser)?);
    }
    Ok(statements)
}

fn statement(parser: &mut Parser) -> Result<Statement, Error> {
    match parser.nth(0) {
        Kind::Semi => {
            parser.bump();
            Ok(Statement::Empty)
        }
        Kind::LanguagesystemKw => language_system(parser),
        Kind::NamedGlyphClass if parser.matches(1, Kind::Eq) => glyph_class_def(parser),
        Kind::MarkClassKw => mark_class(parser),
        Kind::FeatureKw if is_block(parser) => block(parser).map(Statement::Feature),
        Kind::LookupKw if is_block(parser) => block(parser).map(Statement::Lookup),
        Kind::TableKw => table(parser),
        Kind::LookupflagKw => lookup_flag(parser),
        Kind::SubKw | Kind::PosKw | Kind::RsubKw | Kind::EnumKw | Kind::IgnoreKw => {
            rule(parser).map(Statement::Rule)
        }
        Kind::AnonKw => Err(parser.err("Anonymous blocks are not supported")),
        _ => parser.raw_until_semi().map(Statement::Raw),
    }
}

// `feature aalt;` and `lookup foo;` are references, not blocks
fn is_block(parser: &Parser) -> bool {
    parser.matches(2, Kind::LBrace)
        || (parser.matches(2, Kind::UseExtensionKw) && parser.matches(3, Kind::LBrace))
}

fn language_system(parser: &mut Parser) -> Result<Statement, Error> {
    parser.expect(Kind::LanguagesystemKw)?;
    let script = parser.expect_name()?.to_string();
    let language = parser.expect_name()?.to_string();
    parser.expect(Kind::Semi)?;
    Ok(Statement::LanguageSystem { script, language })
}

fn glyph_class_def(parser: &mut Parser) -> Result<Statement, Error> {
    let name = parser.bump().to_string();
    parser.expect(Kind::Eq)?;
    let members = if parser.matches(0, Kind::NamedGlyphClass) {
        vec![parser.bump().to_string()]
    } else {
        class_members(parser)?
    };
    parser.expect(Kind::Semi)?;
    Ok(Statement::GlyphClassDef(GlyphClassDef { name, members }))
}

fn lookup_flag(parser: &mut Parser) -> Result<Statement, Error> {
    let mut words = vec![parser.bump().to_string()];
    let mut references = Vec::new();
    loop {
        match parser.nth(0) {
            Kind::Semi => break,
            Kind::Eof | Kind::LBrace | Kind::RBrace => return Err(parser.err("Expected ';'")),
            Kind::NamedGlyphClass => {
                let name = parser.bump();
                references.push(name.to_string());
                words.push(name.to_string());
            }
            Kind::LSquare => {
                let members = class_members(parser)?;
                words.push(format!("[{}]", members.join(" ")));
                references.extend(members.into_iter().filter(|member| member != "-"));
            }
            _ => words.push(parser.bump().to_string()),
        }
    }
    parser.expect(Kind::Semi)?;
    Ok(Statement::LookupFlag(LookupFlag {
        text: words.join(" "),
        references,
    }))
}

/// A bracketed class: `[a b @c d - z]`.
fn class_members(parser: &mut Parser) -> Result<Vec<String>, Error> {
    parser.expect(Kind::LSquare)?;
    let mut members = Vec::new();
    loop {
        match parser.nth(0) {
            Kind::RSquare => {
                parser.bump();
                break;
            }
            Kind::NamedGlyphClass | Kind::Hyphen => members.push(parser.bump().to_string()),
            Kind::Backslash => {
                parser.bump();
                members.push(parser.expect_name()?.to_string());
            }
            _ => members.push(
                parser
                    .expect_name()
                    .map_err(|_| parser.err("Expected glyph or ']'"))?
                    .to_string(),
            ),
        }
    }
    Ok(members)
}

/// A glyph, a named class or an inline class, with an optional `'` mark.
fn glyph_or_class(parser: &mut Parser) -> Result<Item, Error> {
    let item = match parser.nth(0) {
        Kind::NamedGlyphClass => Item::Class {
            name: parser.bump().to_string(),
            marked: false,
        },
        Kind::LSquare => Item::InlineClass {
            members: class_members(parser)?,
            marked: false,
        },
        Kind::Backslash => {
            parser.bump();
            Item::Glyph {
                name: parser.expect_name()?.to_string(),
                marked: false,
            }
        }
        Kind::Ident | Kind::Number => Item::Glyph {
            name: parser.bump().to_string(),
            marked: false,
        },
        _ => {
            return Err(parser.err(format!(
                "Expected glyph or class, found '{}'",
                parser.current_token_text()
            )))
        }
    };
    if parser.eat(Kind::SingleQuote) {
        return Ok(match item {
            Item::Glyph { name, .. } => Item::Glyph { name, marked: true },
            Item::Class { name, .. } => Item::Class { name, marked: true },
            Item::InlineClass { members, .. } => Item::InlineClass {
                members,
                marked: true,
            },
            other => other,
        });
    }
    Ok(item)
}

/// `<anchor 120 -20>`, `<0 0 50 0>`, `<NULL>`; nested groups are kept.
fn angle_group(parser: &mut Parser) -> Result<String, Error> {
    parser.expect(Kind::LAngle)?;
    let mut parts = Vec::new();
    loop {
        match parser.nth(0) {
            Kind::RAngle => {
                parser.bump();
                break;
            }
            Kind::LAngle => parts.push(angle_group(parser)?),
            Kind::Eof | Kind::Semi => return Err(parser.err("Unterminated '<'")),
            _ => parts.push(parser.bump().to_string()),
        }
    }
    Ok(format!("<{}>", parts.join(" ")))
}

fn mark_class(parser: &mut Parser) -> Result<Statement, Error> {
    parser.expect(Kind::MarkClassKw)?;
    let glyphs = glyph_or_class(parser)?;
    let anchor = angle_group(parser)?;
    if !parser.matches(0, Kind::NamedGlyphClass) {
        return Err(parser.err("Expected mark class name"));
    }
    let class = parser.bump().to_string();
    parser.expect(Kind::Semi)?;
    Ok(Statement::MarkClass(MarkClassDef {
        glyphs,
        anchor,
        class,
    }))
}

fn rule(parser: &mut Parser) -> Result<Rule, Error> {
    let start = parser.nth_range(0).start;
    let ignore = parser.eat(Kind::IgnoreKw);
    let enumerated = parser.eat(Kind::EnumKw);
    let kind = match parser.nth(0) {
        Kind::SubKw => RuleKind::Sub,
        Kind::PosKw => RuleKind::Pos,
        Kind::RsubKw => {
            return Err(Error::UnsupportedRule {
                kind: UnsupportedRule::ReverseChaining,
                range: start..parser.nth_range(0).end,
            })
        }
        _ => return Err(parser.err("Expected 'sub' or 'pos'")),
    };
    parser.bump();

    let mut items = Vec::new();
    loop {
        let item = match parser.nth(0) {
            Kind::Semi => break,
            Kind::Eof => return Err(parser.err("Expected ';'")),
            Kind::LAngle => Item::Value(angle_group(parser)?),
            Kind::Number if kind == RuleKind::Pos => Item::Value(parser.bump().to_string()),
            Kind::Float | Kind::Comma => Item::Value(parser.bump().to_string()),
            Kind::LookupKw => {
                parser.bump();
                Item::LookupRef(parser.expect_name()?.to_string())
            }
            Kind::ByKw
            | Kind::FromKw
            | Kind::MarkKw
            | Kind::BaseKw
            | Kind::LigatureKw
            | Kind::CursiveKw
            | Kind::NullKw => Item::Keyword(parser.bump().to_string()),
            _ => glyph_or_class(parser)?,
        };
        items.push(item);
    }
    let end = parser.expect(Kind::Semi)?.end;
    let range = start..end;

    if kind == RuleKind::Sub {
        let unsupported = if ignore || items.iter().any(Item::is_marked) {
            Some(UnsupportedRule::ContextualSubstitution)
        } else if items.iter().any(|item| is_keyword(item, "from")) {
            Some(UnsupportedRule::AlternateSubstitution)
        } else {
            None
        };
        if let Some(kind) = unsupported {
            return Err(Error::UnsupportedRule { kind, range });
        }
        if !items.iter().any(|item| is_keyword(item, "by")) {
            return Err(Error::Syntax {
                message: "Expected 'by' in substitution".into(),
                range,
            });
        }
    }

    Ok(Rule {
        kind,
        enumerated,
        ignore,
        items,
        range,
    })
}

fn is_keyword(item: &Item, word: &str) -> bool {
    matches!(item, Item::Keyword(kw) if kw == word)
}

/// `feature` or `lookup` block; the keyword decides which.
fn block(parser: &mut Parser) -> Result<Block, Error> {
    parser.bump();
    let name = parser.expect_name()?.to_string();
    let use_extension = parser.eat(Kind::UseExtensionKw);
    parser.expect(Kind::LBrace)?;
    let mut statements = Vec::new();
    loop {
        match parser.nth(0) {
            Kind::RBrace => break,
            Kind::Eof => return Err(parser.err(format!("Unterminated block '{name}'"))),
            _ => statements.push(statement(parser)?),
        }
    }
    parser.expect(Kind::RBrace)?;
    close_block(parser, &name)?;
    Ok(Block {
        name,
        use_extension,
        statements,
    })
}

fn close_block(parser: &mut Parser, name: &str) -> Result<(), Error> {
    let close = parser.expect_name()?;
    if close != name {
        return Err(parser.err(format!(
            "Block '{name}' closed with mismatched name '{close}'"
        )));
    }
    parser.expect(Kind::Semi)?;
    Ok(())
}

fn table(parser: &mut Parser) -> Result<Statement, Error> {
    parser.expect(Kind::TableKw)?;
    let name = parser.expect_name()?.to_string();
    parser.expect(Kind::LBrace)?;
    let mut lines = Vec::new();
    loop {
        match parser.nth(0) {
            Kind::RBrace => break,
            Kind::Semi => {
                parser.bump();
            }
            Kind::Eof => return Err(parser.err(format!("Unterminated table '{name}'"))),
            _ => lines.push(parser.raw_until_semi()?),
        }
    }
    parser.expect(Kind::RBrace)?;
    close_block(parser, &name)?;
    Ok(Statement::Table(Table { name, lines }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse::parse;

    fn glyph(name: &str) -> Item {
        Item::Glyph {
            name: name.into(),
            marked: false,
        }
    }

    #[test]
    fn ligature_substitution() {
        let statements = parse("sub f f i by f_f_i;").unwrap();
        let Statement::Rule(rule) = &statements[0] else {
            panic!("{statements:?}");
        };
        assert_eq!(RuleKind::Sub, rule.kind);
        assert_eq!(
            vec![
                glyph("f"),
                glyph("f"),
                glyph("i"),
                Item::Keyword("by".into()),
                glyph("f_f_i")
            ],
            rule.items
        );
        assert_eq!(0..19, rule.range);
    }

    #[test]
    fn mark_attachment() {
        let statements = parse("pos base [a e] <anchor 250 -20> mark @BOTTOM;").unwrap();
        let Statement::Rule(rule) = &statements[0] else {
            panic!("{statements:?}");
        };
        assert_eq!(
            vec!["a", "e", "@BOTTOM"],
            rule.references().collect::<Vec<_>>()
        );
        assert_eq!(
            "pos base [a e] <anchor 250 -20> mark @BOTTOM;",
            rule.to_string()
        );
    }

    #[test]
    fn pair_positioning_with_marks() {
        let statements = parse("pos T' -40 a';").unwrap();
        let Statement::Rule(rule) = &statements[0] else {
            panic!("{statements:?}");
        };
        assert_eq!(vec!["T", "a"], rule.references().collect::<Vec<_>>());
        assert_eq!("pos T' -40 a';", rule.to_string());
    }

    #[test]
    fn nested_blocks() {
        let fea = "feature mkmk {\n  lookup mkmk1 {\n    lookupflag 0;\n  } mkmk1;\n} mkmk;";
        let statements = parse(fea).unwrap();
        let Statement::Feature(feature) = &statements[0] else {
            panic!("{statements:?}");
        };
        assert_eq!("mkmk", feature.name);
        let Statement::Lookup(lookup) = &feature.statements[0] else {
            panic!("{statements:?}");
        };
        assert_eq!(
            vec![Statement::LookupFlag(LookupFlag {
                text: "lookupflag 0".into(),
                references: Vec::new(),
            })],
            lookup.statements
        );
    }

    #[test]
    fn lookup_flag_classes() {
        let statements =
            parse("lookupflag RightToLeft  UseMarkFilteringSet @top;
lookupflag MarkAttachmentType [grave acute];")
                .unwrap();
        assert_eq!(
            vec![
                Statement::LookupFlag(LookupFlag {
                    text: "lookupflag RightToLeft UseMarkFilteringSet @top".into(),
                    references: vec!["@top".into()],
                }),
                Statement::LookupFlag(LookupFlag {
                    text: "lookupflag MarkAttachmentType [grave acute]".into(),
                    references: vec!["grave".into(), "acute".into()],
                }),
            ],
            statements
        );
    }

    #[test]
    fn references_are_not_blocks() {
        let statements = parse("feature aalt { feature salt; lookup foo; } aalt;").unwrap();
        let Statement::Feature(feature) = &statements[0] else {
            panic!("{statements:?}");
        };
        assert_eq!(
            vec![
                Statement::Raw("feature salt".into()),
                Statement::Raw("lookup foo".into())
            ],
            feature.statements
        );
    }

    #[test]
    fn class_definitions() {
        let statements = parse("@lc = [a - z \\sub];\n@copy = @lc;").unwrap();
        assert_eq!(
            vec![
                Statement::GlyphClassDef(GlyphClassDef {
                    name: "@lc".into(),
                    members: vec!["a".into(), "-".into(), "z".into(), "sub".into()],
                }),
                Statement::GlyphClassDef(GlyphClassDef {
                    name: "@copy".into(),
                    members: vec!["@lc".into()],
                }),
            ],
            statements
        );
    }

    #[test]
    fn tables_keep_their_lines() {
        let statements = parse("table GDEF {\n GlyphClassDef [a], , [grave], ;\n} GDEF;").unwrap();
        assert_eq!(
            vec![Statement::Table(Table {
                name: "GDEF".into(),
                lines: vec!["GlyphClassDef [a], , [grave],".into()],
            })],
            statements
        );
    }

    #[test]
    fn contextual_substitution_is_unsupported() {
        let err = parse("sub a' b by c;").unwrap_err();
        assert!(
            matches!(
                err,
                Error::UnsupportedRule {
                    kind: UnsupportedRule::ContextualSubstitution,
                    ..
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn alternate_and_reverse_substitution_are_unsupported() {
        assert!(matches!(
            parse("sub a from [a.alt a.ss01];"),
            Err(Error::UnsupportedRule {
                kind: UnsupportedRule::AlternateSubstitution,
                ..
            })
        ));
        assert!(matches!(
            parse("rsub a b' by c;"),
            Err(Error::UnsupportedRule {
                kind: UnsupportedRule::ReverseChaining,
                ..
            })
        ));
    }

    #[test]
    fn mismatched_block_name() {
        let err = parse("feature liga { sub f i by f_i; } ligx;").unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }), "{err:?}");
    }

    #[test]
    fn unterminated_block() {
        let err = parse("lookup foo {\n sub a by b;\n").unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }), "{err:?}");
    }
}
