// End-to-end pipeline tests over fixture files: load → index → search →
// aggregate, without the web layer.

use std::io::Write;
use std::path::Path;

use approx::assert_relative_eq;
use herbmap::{aggregate, search, DataPaths, Dataset, RegionIndex, SearchMode};

fn write_fixture(dir: &Path, name: &str, contents: &str) {
    let mut file = std::fs::File::create(dir.join(name)).expect("create fixture");
    file.write_all(contents.as_bytes()).expect("write fixture");
}

fn fixture_dataset() -> (Dataset, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixture(
        dir.path(),
        "clean.csv",
        "\
Tên khoa học,Tên tiếng Việt,Tên đồng nghĩa,Họ thực vật,Công dụng,Phân bố
Aloe vera,Lô hội,Aloe barbadensis,Asphodelaceae,wound healing,\"Hanoi, Hue\"
Curcuma longa,Nghệ,,Zingiberaceae,anti-inflammatory,Quang Nam
",
    );
    write_fixture(
        dir.path(),
        "vietnam_provinces.csv",
        "\
Tỉnh Thành,Latitude,Longitude
Hanoi,21.0,105.8
Hue,16.4,107.6
Quang Nam,15.5,108.0
",
    );
    write_fixture(
        dir.path(),
        "vn.json",
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"name":"Vietnam"},
             "geometry":{"type":"Polygon","coordinates":[[[102.1,8.4],[109.5,8.4],[109.5,23.4],[102.1,23.4],[102.1,8.4]]]}}
        ]}"#,
    );

    let dataset = Dataset::load(&DataPaths::from_dir(dir.path())).expect("load dataset");
    (dataset, dir)
}

#[test]
fn disease_query_produces_weighted_points_in_province_order() {
    let (dataset, _dir) = fixture_dataset();
    let index = RegionIndex::build(&dataset.plants, &dataset.provinces);

    let matched = search(&dataset.plants, SearchMode::Disease, "wound");
    assert_eq!(matched.len(), 1);
    assert!(matched.contains("Aloe vera"));

    let points = aggregate(&matched, &index);
    assert_eq!(points.len(), 2);
    assert_relative_eq!(points[0].latitude, 21.0);
    assert_relative_eq!(points[0].longitude, 105.8);
    assert_eq!(points[0].weight, 1);
    assert_relative_eq!(points[1].latitude, 16.4);
    assert_relative_eq!(points[1].longitude, 107.6);
    assert_eq!(points[1].weight, 1);
}

#[test]
fn plant_query_with_no_match_yields_empty_sequence() {
    let (dataset, _dir) = fixture_dataset();
    let index = RegionIndex::build(&dataset.plants, &dataset.provinces);

    let matched = search(&dataset.plants, SearchMode::Plant, "nonexistent");
    assert!(matched.is_empty());
    assert!(aggregate(&matched, &index).is_empty());
}

#[test]
fn index_is_case_sensitive_while_search_is_not() {
    let (dataset, _dir) = fixture_dataset();
    let index = RegionIndex::build(&dataset.plants, &dataset.provinces);

    // Query matches regardless of case...
    let matched = search(&dataset.plants, SearchMode::Family, "ZINGIBERACEAE");
    assert!(matched.contains("Curcuma longa"));

    // ...but placement happened against the literal distribution text.
    assert_eq!(index.get("Quang Nam").unwrap().plants, vec!["Curcuma longa"]);
}

#[test]
fn boundary_feature_is_loaded_for_the_outline() {
    let (dataset, _dir) = fixture_dataset();
    let boundary = dataset.boundary.expect("boundary present");
    assert_eq!(boundary.name, "Vietnam");
}
