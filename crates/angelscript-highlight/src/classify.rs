use tower_lsp::lsp_types::SemanticTokenModifier;

use crate::category::HighlightCategory;

/// The modifier subset that refines a base category. Anything else on the
/// wire is ignored rather than rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Modifiers {
    declaration: bool,
    is_static: bool,
    readonly: bool,
    default_library: bool,
}

impl Modifiers {
    fn parse<S: AsRef<str>>(modifiers: &[S]) -> Self {
        let mut parsed = Modifiers::default();
        for modifier in modifiers {
            let modifier = modifier.as_ref();
            if modifier == SemanticTokenModifier::DECLARATION.as_str() {
                parsed.declaration = true;
            } else if modifier == SemanticTokenModifier::STATIC.as_str() {
                parsed.is_static = true;
            } else if modifier == SemanticTokenModifier::READONLY.as_str() {
                parsed.readonly = true;
            } else if modifier == SemanticTokenModifier::DEFAULT_LIBRARY.as_str() {
                parsed.default_library = true;
            }
        }
        parsed
    }
}

/// Per-type refinement rule. Types without modifier distinctions map to a
/// fixed category; the rest pick exactly one refinement, with `declaration`
/// winning over `static`/`readonly` and `defaultLibrary` considered only
/// when `declaration` is absent.
#[derive(Debug, Clone, Copy)]
enum TypeRule {
    Fixed(HighlightCategory),
    Namespace,
    Class,
    Method,
    Function,
    Variable,
    Property,
}

/// Standard LSP vocabulary, spelled as on the wire. The spellings are pinned
/// against `lsp_types` constants in the tests below.
const STANDARD_TYPES: &[(&str, TypeRule)] = &[
    ("namespace", TypeRule::Namespace),
    ("class", TypeRule::Class),
    ("method", TypeRule::Method),
    ("function", TypeRule::Function),
    ("variable", TypeRule::Variable),
    ("property", TypeRule::Property),
    ("enum", TypeRule::Fixed(HighlightCategory::Enum)),
    ("interface", TypeRule::Fixed(HighlightCategory::Interface)),
    ("struct", TypeRule::Fixed(HighlightCategory::Struct)),
    ("typeParameter", TypeRule::Fixed(HighlightCategory::TypeParameter)),
    ("type", TypeRule::Fixed(HighlightCategory::Type)),
    ("parameter", TypeRule::Fixed(HighlightCategory::Parameter)),
    ("enumMember", TypeRule::Fixed(HighlightCategory::EnumMember)),
    ("decorator", TypeRule::Fixed(HighlightCategory::Decorator)),
    ("event", TypeRule::Fixed(HighlightCategory::Event)),
    ("macro", TypeRule::Fixed(HighlightCategory::Macro)),
    ("comment", TypeRule::Fixed(HighlightCategory::Comment)),
    ("string", TypeRule::Fixed(HighlightCategory::String)),
    ("keyword", TypeRule::Fixed(HighlightCategory::Keyword)),
    ("number", TypeRule::Fixed(HighlightCategory::Number)),
    ("regexp", TypeRule::Fixed(HighlightCategory::Regexp)),
    ("modifier", TypeRule::Fixed(HighlightCategory::Modifier)),
    ("operator", TypeRule::Fixed(HighlightCategory::Operator)),
];

/// Maps a semantic token's type and modifiers to a highlight category.
///
/// Total over the declared vocabulary (the standard LSP types plus the
/// server-specific `directive`, `builtin` and `label`); anything else yields
/// `None`, which callers must treat as "leave unhighlighted", not an error.
pub fn classify<S: AsRef<str>>(
    token_type: &str,
    modifiers: &[S],
) -> Option<HighlightCategory> {
    // Server-specific synonyms take priority over the standard vocabulary.
    match token_type {
        "directive" => return Some(HighlightCategory::Macro),
        "builtin" => return Some(HighlightCategory::Keyword),
        "label" => return Some(HighlightCategory::Label),
        _ => {}
    }
    let (_, rule) = STANDARD_TYPES
        .iter()
        .find(|(name, _)| *name == token_type)?;
    let m = Modifiers::parse(modifiers);
    Some(match rule {
        TypeRule::Fixed(category) => *category,
        TypeRule::Namespace if m.declaration => HighlightCategory::NamespaceDeclaration,
        TypeRule::Namespace => HighlightCategory::Namespace,
        TypeRule::Class if m.declaration => HighlightCategory::ClassDeclaration,
        TypeRule::Class => HighlightCategory::Class,
        TypeRule::Method if m.declaration => HighlightCategory::MethodDeclaration,
        TypeRule::Method if m.default_library => HighlightCategory::DefaultLibraryMethod,
        TypeRule::Method if m.is_static => HighlightCategory::StaticMethod,
        TypeRule::Method => HighlightCategory::Method,
        TypeRule::Function if m.declaration => HighlightCategory::FunctionDeclaration,
        TypeRule::Function if m.default_library => HighlightCategory::DefaultLibraryFunction,
        TypeRule::Function => HighlightCategory::Function,
        TypeRule::Variable if m.is_static && m.readonly => {
            HighlightCategory::StaticReadonlyVariable
        }
        TypeRule::Variable if m.is_static => HighlightCategory::StaticVariable,
        TypeRule::Variable if m.readonly => HighlightCategory::ReadonlyVariable,
        TypeRule::Variable => HighlightCategory::Variable,
        TypeRule::Property if m.is_static && m.readonly => {
            HighlightCategory::StaticReadonlyProperty
        }
        TypeRule::Property if m.is_static => HighlightCategory::StaticProperty,
        TypeRule::Property if m.readonly => HighlightCategory::ReadonlyProperty,
        TypeRule::Property => HighlightCategory::Property,
    })
}
