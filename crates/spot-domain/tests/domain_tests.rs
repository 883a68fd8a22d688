use spot_domain::table::{FLAME_KEY, SELF_KEY};
use spot_domain::{OutcomeKind, OutcomeRecord, ReactionTable, Rgb, Solution};

fn chemdb() -> ReactionTable {
    ReactionTable::from_json_str(include_str!("../../../data/chemdb.json")).unwrap()
}

#[test]
fn test_bundled_table_loads_in_declaration_order() {
    let t = chemdb();
    assert_eq!(t.len(), 17);
    let first: Vec<&str> = t.cations().take(3).collect();
    assert_eq!(first, vec!["Ag+", "Pb2+", "Hg2+"]);
    assert_eq!(t.all_anions().first().map(String::as_str), Some("Cl-"));
}

#[test]
fn test_sentinels_never_appear_as_anions() {
    let t = chemdb();
    for anion in t.all_anions() {
        assert_ne!(anion, SELF_KEY);
        assert_ne!(anion, FLAME_KEY);
    }
    for (_, anion, _) in t.pairs() {
        assert_ne!(anion, SELF_KEY);
        assert_ne!(anion, FLAME_KEY);
    }
    assert!(t.flame_test("K+").is_some());
    assert!(t.flame_test("Ag+").is_none());
}

#[test]
fn test_no_reaction_records_never_carry_color() {
    let t = chemdb();
    for (cation, anion, record) in t.pairs() {
        if record.is_no_reaction() {
            assert!(record.color.is_none() && record.rgb.is_none(), "{cation}/{anion}");
            assert!(t.outcome_rgb(record).is_none());
        }
    }
}

#[test]
fn test_placeholder_self_color_is_ignored() {
    // Mn2+ declara "color" como color propio: no se adivina nada.
    let t = chemdb();
    assert_eq!(t.intrinsic_color("Mn2+"), None);
    assert_eq!(t.intrinsic_swatch("Mn2+", "NO3-"), None);
    assert_eq!(t.intrinsic_color("Cu2+"), Some("blue"));
}

#[test]
fn test_intrinsic_swatch_uses_compound_keys() {
    let t = chemdb();
    let sw = t.intrinsic_swatch("K+", "CrO4 2-").unwrap();
    assert_eq!(sw.name, "yellow");
    assert_eq!(sw.rgb, Rgb(255, 230, 0));
    assert_eq!(t.intrinsic_swatch("K+", "NO3-"), None);
    // El color propio del catión tiene prioridad sobre la tabla de compuestos.
    assert_eq!(t.intrinsic_swatch("Fe3+", "CrO4 2-").map(|s| s.name), Some("yellow".to_string()));
}

#[test]
fn test_notes_accept_string_or_list() {
    let t = chemdb();
    let single = t.lookup("Ag+", "SO4 2-").unwrap();
    assert_eq!(single.notes.len(), 1);
    let listed = t.lookup("Pb2+", "I-").unwrap();
    assert_eq!(listed.notes, vec!["Goldflitter beim Abkühlen".to_string()]);
    assert_eq!(t.lookup("Ag+", "Cl-").unwrap().eq.as_deref(), Some("Ag+ + Cl- -> AgCl"));
}

#[test]
fn test_colorless_observation_is_not_colored() {
    let t = chemdb();
    let gas = t.lookup("NH4+", "OH-").unwrap();
    assert_eq!(gas.kind, OutcomeKind::Observation);
    assert!(!t.is_colored(gas));
    assert_eq!(t.colored_outcome_count("NH4+"), 0);
    assert_eq!(t.colored_outcome_count("K+"), 0);
    assert!(t.colored_outcome_count("Ag+") > t.colored_outcome_count("Zn2+"));
}

#[test]
fn test_aliases_lookup() {
    let t = chemdb();
    assert_eq!(t.aliases("Fe3+"), &["iron(III)".to_string(), "Eisen(III)".to_string()]);
    assert!(t.aliases("Na+").is_empty());
}

#[test]
fn test_outcome_record_constructors_normalize() {
    let nr = OutcomeRecord::new(OutcomeKind::NoReaction, Some("red"));
    assert_eq!(nr, OutcomeRecord::no_reaction());
    assert_eq!(OutcomeRecord::precipitate("white").color.as_deref(), Some("white"));
}

#[test]
fn test_solution_serializes_camel_case() {
    let t = chemdb();
    let sol = Solution::new(2, "K+", "CrO4 2-", t.intrinsic_swatch("K+", "CrO4 2-"));
    let v = serde_json::to_value(&sol).unwrap();
    assert_eq!(v["label"], "P3");
    assert_eq!(v["intrinsicColor"]["name"], "yellow");
    assert_eq!(v["intrinsicColor"]["rgb"], serde_json::json!([255, 230, 0]));
    let plain = serde_json::to_value(Solution::new(0, "Na+", "NO3-", None)).unwrap();
    assert!(plain.get("intrinsicColor").is_none());
}
