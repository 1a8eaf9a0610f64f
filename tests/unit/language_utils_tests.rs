/*!
 * Tests for language code handling
 */

use slugline::language_utils::{
    get_language_name, normalize_to_part1_or_part2t, resolve_target_language,
    validate_language_code, LanguageCodeType, DEFAULT_TARGET_LANGUAGE,
};

#[test]
fn test_validate_languageCode_shouldClassifyCodes() {
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("FR").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("deu").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("english").is_err());
}

#[test]
fn test_normalize_shouldPreferTwoLetterCodes() {
    assert_eq!(normalize_to_part1_or_part2t("fra").unwrap(), "fr");
    assert_eq!(normalize_to_part1_or_part2t("ger").unwrap(), "de");
    assert_eq!(normalize_to_part1_or_part2t(" JA ").unwrap(), "ja");
    assert!(normalize_to_part1_or_part2t("q1q").is_err());
}

#[test]
fn test_resolveTargetLanguage_withUnusableCode_shouldFallBackToEnglish() {
    assert_eq!(DEFAULT_TARGET_LANGUAGE, "en");
    assert_eq!(resolve_target_language(""), "en");
    assert_eq!(resolve_target_language("  "), "en");
    assert_eq!(resolve_target_language("xx"), "en");
    assert_eq!(resolve_target_language("klingon"), "en");
}

#[test]
fn test_resolveTargetLanguage_withValidCode_shouldNormalize() {
    assert_eq!(resolve_target_language("fra"), "fr");
    assert_eq!(resolve_target_language("DE"), "de");
    assert_eq!(resolve_target_language("en"), "en");
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("fre").unwrap(), "French");
    assert!(get_language_name("xx").is_err());
}
