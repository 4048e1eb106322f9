use serde::Serialize;

/// Final rendering classification handed to the editor. Pure output; a
/// missing classification is expressed as `Option::None` by the callers,
/// never as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HighlightCategory {
    Namespace,
    NamespaceDeclaration,
    Class,
    ClassDeclaration,
    Enum,
    Interface,
    Struct,
    TypeParameter,
    Type,
    Parameter,
    Variable,
    StaticVariable,
    ReadonlyVariable,
    StaticReadonlyVariable,
    Property,
    StaticProperty,
    ReadonlyProperty,
    StaticReadonlyProperty,
    EnumMember,
    Decorator,
    Event,
    Function,
    FunctionDeclaration,
    DefaultLibraryFunction,
    Method,
    MethodDeclaration,
    StaticMethod,
    DefaultLibraryMethod,
    Macro,
    Comment,
    String,
    Keyword,
    Number,
    Regexp,
    Modifier,
    Operator,
    Label,
}

/// One classified span for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub category: HighlightCategory,
    pub start: u32,
    pub length: u32,
}
