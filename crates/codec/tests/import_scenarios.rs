use chrono::NaiveDate;

use flora_codec::{Format, LINE_HEADER, export_lines, export_structured, import_lines, import_structured};
use flora_plants::{Plant, PlantCatalog, PlantType};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn line_import_skips_malformed_rows_and_keeps_order() {
    let text = format!(
        "{LINE_HEADER}\n\
         Rose,Flower,2,0.5,2023-05-15,true\n\
         Oak,Tree,old,20.0,1980-01-01,false\n\
         ,Shrub,3,1.2,2015-06-30,true\n\
         Tulip,Flower,1,0.3,2024-04-10,false\n"
    );

    let imported = import_lines(&text);
    let names: Vec<&str> = imported.plants.iter().map(Plant::name).collect();
    assert_eq!(names, vec!["Rose", "Tulip"]);
    assert_eq!(imported.skipped, 2);
}

#[test]
fn imported_rows_fill_catalog_up_to_capacity() {
    let text = format!(
        "{LINE_HEADER}\n\
         Alpha,Tree,5,2.0,2010-01-01,true\n\
         Beta,Shrub,5,1.5,2010-01-01,true\n\
         Gamma,Fern,5,3.0,2010-01-01,true\n"
    );

    let mut catalog = PlantCatalog::new(2).unwrap();
    let added = catalog.try_add_all(import_lines(&text).plants);

    assert_eq!(added, 2);
    assert_eq!(catalog.size(), 2);
    assert_eq!(catalog.aggregate().count(), 2);
    assert_eq!(catalog.aggregate().average_height(), 1.75);
    assert_eq!(catalog.aggregate().describe(), "total 2, average height 1.75");
}

#[test]
fn exports_are_deterministic_and_keep_duplicates() {
    let mut catalog = PlantCatalog::default();
    let ivy = Plant::new("Ivy", PlantType::Vine, 4, 2.5, date(2019, 5, 5)).unwrap();
    catalog.try_add(ivy.clone());
    catalog.try_add(Plant::new("Aloe", PlantType::Cactus, 3, 0.4, date(2020, 2, 2)).unwrap());
    catalog.try_add(ivy);

    let first = export_lines(catalog.iter());
    assert_eq!(first, export_lines(catalog.iter()));
    assert_eq!(first.lines().count(), 4);
    assert_eq!(first.lines().nth(3), Some("Ivy,Vine,4,2.5,2019-05-05,true"));

    let json = export_structured(catalog.iter()).unwrap();
    assert_eq!(json, export_structured(catalog.iter()).unwrap());
    let names: Vec<String> = import_structured(&json)
        .unwrap()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(names, vec!["Ivy", "Aloe", "Ivy"]);
}

#[test]
fn format_dispatch_round_trips_through_both_formats() {
    let plants = vec![
        Plant::new("Rose", PlantType::Flower, 2, 0.5, date(2023, 5, 15)).unwrap(),
        Plant::new("Bamboo", PlantType::Grass, 7, 12.125, date(2017, 8, 1))
            .unwrap()
            .with_flowering(false),
    ];

    let lines = Format::Lines.export(&plants).unwrap();
    assert_eq!(Format::Lines.import(&lines).unwrap().plants, plants);

    let json = Format::Structured.export(&plants).unwrap();
    let restored = Format::Structured.import(&json).unwrap().plants;
    assert_eq!(restored.len(), plants.len());
    assert_eq!(restored[1].height(), 12.125);
    assert!(!restored[1].is_flowering());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn plant() -> impl Strategy<Value = Plant> {
        (
            "[A-Za-z]{2,12}( [A-Za-z]{2,12})?",
            prop::sample::select(PlantType::ALL.to_vec()),
            0i64..=5000,
            0.01f64..=115.7,
            (1900i32..=2020, 1u32..=12, 1u32..=28),
            any::<bool>(),
        )
            .prop_map(|(name, plant_type, age, height, (y, m, d), flowering)| {
                Plant::new(&name, plant_type, age, height, date(y, m, d))
                    .unwrap()
                    .with_flowering(flowering)
            })
    }

    proptest! {
        /// Property: the line format is lossless for any valid collection.
        #[test]
        fn line_format_is_lossless(plants in prop::collection::vec(plant(), 0..16)) {
            let imported = import_lines(&export_lines(&plants));
            prop_assert_eq!(imported.skipped, 0);
            prop_assert_eq!(imported.plants, plants);
        }
    }
}
