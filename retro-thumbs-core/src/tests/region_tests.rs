use super::*;

fn policy() -> RegionPolicy {
    RegionPolicy::default()
}

#[test]
fn test_tokens_from_parens_and_brackets() {
    let tokens = bracketed_tokens("Super Game (USA, Europe) [b1] (Rev 2)");
    assert_eq!(tokens, vec!["USA, Europe", "b1", "Rev 2"]);
}

#[test]
fn test_europe_code_leads_with_mapped_regions() {
    let res = policy().resolve("Super Game (E) (Disc 1)", None, "Sony Playstation");
    assert_eq!(res.detected_code.as_deref(), Some("E"));
    assert_eq!(res.priority[0], "Europe");
    assert_eq!(res.priority[1], "Europe, Japan");
    // Remaining defaults follow, without repeating the detected ones
    assert_eq!(res.priority[2], REGION_FREE);
    assert_eq!(
        res.priority.iter().filter(|r| *r == "Europe").count(),
        1,
        "detected region should not be repeated"
    );
    assert!(res.priority.contains(&"The Netherlands".to_string()));
}

#[test]
fn test_first_table_group_wins_over_token_order() {
    // "Japan" appears first in the name, but the USA group is declared first
    let res = policy().resolve("Game (Japan) (USA)", None, "Nintendo 64");
    assert_eq!(res.detected_code.as_deref(), Some("USA"));
    assert_eq!(res.priority[0], "North America");
}

#[test]
fn test_genesis_f_means_world() {
    let res = policy().resolve("Sonic (F)", None, "Sega Genesis");
    assert_eq!(res.detected_code.as_deref(), Some("W"));
    assert_eq!(res.priority[0], "World");

    let res = policy().resolve("Sonic (F)", None, "Sega Master System");
    assert_eq!(res.detected_code.as_deref(), Some("F"));
    assert_eq!(res.priority[0], "France");
}

#[test]
fn test_region_free_prepended_when_requested() {
    let mut policy = policy();
    policy.always_prioritize_region_free = true;
    let res = policy.resolve("Game (J)", None, "Nintendo 64");
    assert_eq!(&res.priority[..4], &[REGION_FREE, "Japan", "Japan, Korea", "Asia"]);
    assert_eq!(res.priority.iter().filter(|r| *r == REGION_FREE).count(), 1);
}

#[test]
fn test_detected_regions_only_drops_defaults() {
    let mut policy = policy();
    policy.detected_regions_only = true;
    let res = policy.resolve("Game (U)", None, "Nintendo 64");
    assert_eq!(res.priority, vec!["North America", "United States"]);

    let res = policy.resolve("Game", Some("Germany"), "Nintendo 64");
    assert_eq!(res.priority, vec!["Germany"]);
}

#[test]
fn test_declared_region_used_without_code() {
    let res = policy().resolve("Game (Rev A)", Some("Japan"), "Nintendo 64");
    assert_eq!(res.detected_code, None);
    assert_eq!(res.priority[0], "Japan");
    assert_eq!(res.priority[1], REGION_FREE);
    assert_eq!(res.priority.len(), default_region_priority().len());
}

#[test]
fn test_no_code_no_declared_region_returns_defaults() {
    let res = policy().resolve("Plain Game", None, "Nintendo 64");
    assert_eq!(res.detected_code, None);
    assert_eq!(res.priority, default_region_priority());

    let res = policy().resolve("Plain Game", Some("  "), "Nintendo 64");
    assert_eq!(res.priority, default_region_priority());
}

#[test]
fn test_numeric_codes_are_matched_exactly() {
    let res = policy().resolve("Game (8)", None, "Sega Master System");
    assert_eq!(res.detected_code.as_deref(), Some("8"));
    assert_eq!(res.priority[0], "Europe");

    // "18" is not "8" or "1"
    let res = policy().resolve("Game (18)", None, "Sega Master System");
    assert_eq!(res.detected_code, None);
}

#[test]
fn test_region_free_aliases() {
    assert!(is_region_free(REGION_FREE));
    assert!(is_region_free(""));
    assert!(is_region_free("."));
    assert!(!is_region_free("World"));
}
