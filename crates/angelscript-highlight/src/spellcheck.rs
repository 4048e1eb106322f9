use std::sync::LazyLock;

use angelscript_syntax::{Token, TokenKind};
use rustc_hash::FxHashSet;

/// Unreal Engine macro names and property/function specifiers that show up
/// verbatim in AngelScript sources and would otherwise be flagged as typos.
static ENGINE_MACROS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "UPROPERTY",
        "UFUNCTION",
        "UCLASS",
        "USTRUCT",
        "UENUM",
        "UINTERFACE",
        "UDELEGATE",
        "BlueprintReadWrite",
        "BlueprintReadOnly",
        "EditAnywhere",
        "EditDefaultsOnly",
        "EditInstanceOnly",
        "VisibleAnywhere",
        "VisibleDefaultsOnly",
        "VisibleInstanceOnly",
        "Category",
        "BlueprintCallable",
        "BlueprintPure",
        "BlueprintImplementableEvent",
        "BlueprintNativeEvent",
        "CallInEditor",
        "Exec",
        "Server",
        "Client",
        "NetMulticast",
        "Reliable",
        "Unreliable",
        "WithValidation",
        "BlueprintAuthorityOnly",
        "BlueprintCosmetic",
        "Transient",
        "DuplicateTransient",
        "TextExportTransient",
        "NonPIEDuplicateTransient",
        "SaveGame",
        "AssetRegistrySearchable",
        "SimpleDisplay",
        "AdvancedDisplay",
        "Config",
        "GlobalConfig",
        "Localized",
        "Instanced",
        "BlueprintAssignable",
        "Replicated",
        "ReplicatedUsing",
        "NotReplicated",
        "RepSkip",
        "Interp",
        "NonTransactional",
        "NoClear",
        "EditFixedSize",
        "NoDestructor",
        "AutoWeak",
    ]
    .into_iter()
    .collect()
});

/// Unreal type-name convention: a single conventional prefix letter
/// (UObject-derived, AActor-derived, plain structs, templates, interfaces,
/// enums) followed immediately by an uppercase letter.
fn has_framework_prefix(text: &str) -> bool {
    let mut chars = text.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return false;
    };
    matches!(first, 'U' | 'A' | 'F' | 'T' | 'I' | 'E') && second.is_ascii_uppercase()
}

/// Whether `token` is eligible for the host editor's spell-checker.
///
/// Keywords and engine-specific identifiers (macro names and prefixed
/// framework types) are excluded; everything else, including string and
/// comment contents, follows the editor's normal spell-check path.
pub fn should_spell_check(token: &Token, source: &str) -> bool {
    match token.kind {
        TokenKind::Keyword => false,
        TokenKind::Identifier => {
            let text = token.text(source);
            !ENGINE_MACROS.contains(text) && !has_framework_prefix(text)
        }
        _ => true,
    }
}
