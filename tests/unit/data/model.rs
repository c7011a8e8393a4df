use super::*;

const CATALOG: &str = r##"{
    "zeta": {
        "id": "zeta",
        "name": "Zeta",
        "color": "hsl(200, 80%, 60%)",
        "galaxyPosition": { "x": 0.2, "y": 0.7 },
        "date": "2021",
        "planets": [
            { "name": "Inner", "color": "#ff0000", "orbitRadius": 80, "size": 6, "title": "Inner", "body": "hello" }
        ],
        "sun": { "color": "hsl(60, 100%, 90%)", "title": "Zeta core" }
    },
    "alpha": {
        "name": "Alpha",
        "galaxyPosition": { "x": 0.8, "y": 0.3 }
    },
    "broken": { "name": "No position" }
}"##;

#[test]
fn catalog_preserves_source_order_and_skips_malformed() {
    let c = ProjectCatalog::from_json_str(CATALOG).unwrap();
    let ids: Vec<&str> = c.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["zeta", "alpha"]);
    assert_eq!(c.len(), 2);
}

#[test]
fn missing_id_falls_back_to_key() {
    let c = ProjectCatalog::from_json_str(CATALOG).unwrap();
    let alpha = c.get("alpha").unwrap();
    assert_eq!(alpha.name, "Alpha");
    assert!(alpha.planets.is_empty());
    assert_eq!(alpha.sun, SunRecord::default());
}

#[test]
fn camel_case_fields_are_read() {
    let c = ProjectCatalog::from_json_str(CATALOG).unwrap();
    let zeta = c.get("zeta").unwrap();
    assert_eq!(zeta.galaxy_position, GalaxyPosition { x: 0.2, y: 0.7 });
    assert_eq!(zeta.planets[0].orbit_radius, 80.0);
    assert_eq!(zeta.discovered_label(), "Discovered 2021");
    assert_eq!(c.get("alpha").unwrap().discovered_label(), "");
}

#[test]
fn non_object_catalog_is_an_error() {
    assert!(ProjectCatalog::from_json_str("[1,2,3]").is_err());
    assert!(ProjectCatalog::from_json_str("not json").is_err());
}

#[test]
fn duplicate_ids_keep_first() {
    let json = r#"{
        "a": { "id": "same", "name": "First", "galaxyPosition": { "x": 0.1, "y": 0.1 } },
        "b": { "id": "same", "name": "Second", "galaxyPosition": { "x": 0.9, "y": 0.9 } }
    }"#;
    let c = ProjectCatalog::from_json_str(json).unwrap();
    assert_eq!(c.len(), 1);
    assert_eq!(c.get("same").unwrap().name, "First");
}

#[test]
fn about_default_is_placeholder() {
    let a = AboutRecord::default();
    assert_eq!(a.title, "About");
    assert_eq!(a.info, "Content loading failed.");
    assert!(a.help.is_none());
}
