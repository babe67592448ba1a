use super::*;

#[test]
fn original_recipe_is_identity_without_layers() {
    let r = recipe_for(FilterPreset::Original);
    assert!(r.base.is_identity());
    assert!(r.tints.is_empty());
}

#[test]
fn every_non_original_preset_grades_something() {
    for p in FilterPreset::ALL {
        if p == FilterPreset::Original {
            continue;
        }
        let r = recipe_for(p);
        assert!(!r.base.is_identity() || !r.tints.is_empty(), "{p}");
        for t in r.tints {
            assert!((0.0..=1.0).contains(&t.opacity), "{p}");
        }
    }
}

#[test]
fn recipe_lookup_is_deterministic() {
    for p in FilterPreset::ALL {
        assert_eq!(recipe_for(p), recipe_for(p));
    }
}

#[test]
fn grain_amplitudes_per_preset() {
    for p in FilterPreset::ALL {
        let expected = match p {
            FilterPreset::Original => 0,
            FilterPreset::RetroNoir => 45,
            _ => 25,
        };
        assert_eq!(grain_amplitude(p), expected, "{p}");
    }
}

#[test]
fn teal_orange_layers_are_orange_overlay_then_teal_burn() {
    let r = recipe_for(FilterPreset::CineTealOrange);
    assert_eq!(r.tints.len(), 2);
    assert_eq!(r.tints[0].mode, BlendMode::Overlay);
    assert!(r.tints[0].color.r > r.tints[0].color.b);
    assert_eq!(r.tints[1].mode, BlendMode::ColorBurn);
    assert!(r.tints[1].color.b > r.tints[1].color.r);
}

#[test]
fn noir_base_is_fully_desaturated() {
    assert_eq!(recipe_for(FilterPreset::RetroNoir).base.saturation, 0.0);
}

#[test]
fn preset_parses_from_common_spellings() {
    assert_eq!(
        "retro-noir".parse::<FilterPreset>().unwrap(),
        FilterPreset::RetroNoir
    );
    assert_eq!(
        "CINE_TEAL_ORANGE".parse::<FilterPreset>().unwrap(),
        FilterPreset::CineTealOrange
    );
    assert_eq!(
        " cine_vivid ".parse::<FilterPreset>().unwrap(),
        FilterPreset::CineVivid
    );
    assert!("sepia".parse::<FilterPreset>().is_err());
}

#[test]
fn preset_serializes_as_screaming_snake_case() {
    let json = serde_json::to_string(&FilterPreset::RetroInstant).unwrap();
    assert_eq!(json, "\"RETRO_INSTANT\"");
    let back: FilterPreset = serde_json::from_str("\"CINE_MOODY\"").unwrap();
    assert_eq!(back, FilterPreset::CineMoody);
}
