mod util;
use skycube::prelude::*;
use std::fs;
use util::*;

const CARS: &str = "\
fiesta 12 95 4.1
clio 11 90 4.4
golf 18 120 5.0
polo 12 95 4.1
punto 15 80 5.6
";

fn read_cars() -> Dataset {
    DatasetReader::new()
        .with_labels(true)
        .with_preferences(Preference::parse_all("lul").unwrap())
        .read(CARS.as_bytes())
        .unwrap()
}

#[test]
fn labelled_table_through_every_strategy() {
    let ds = read_cars();
    assert_eq!(ds.n_points(), 5);
    assert_eq!(ds.n_dims(), 3);
    assert_eq!(ds.label(pid(3)), Some("polo"));
    for strategy in ALL_STRATEGIES {
        let (_, all) = run_collect(&ds, strategy);
        assert_matches_reference(&ds, strategy, &all);
        // clio is the cheapest
        let price = all.get(&path(&[0])).unwrap();
        assert_eq!(price.distinct_slice(), ids(&[1]).as_slice());
    }
}

#[test]
fn breadth_report_uses_labels() {
    let mut cube = Skycube::new(read_cars());
    cube.breadth_first(false).unwrap();
    let mut out = Vec::new();
    ReportWriter.write_result(&mut out, &cube).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "d0 : clio");
    assert_eq!(lines[1], "d1 : golf");
    assert_eq!(lines[2], "d2 : fiesta-polo");
    assert!(lines[3].starts_with("d0d1 : "));
    assert!(lines[6].starts_with("d0d1d2 : "));
}

#[test]
fn depth_report_lists_closures() {
    let mut cube = Skycube::new(read_cars());
    cube.depth_first(true).unwrap();
    let mut out = Vec::new();
    ReportWriter.write_result(&mut out, &cube).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), cube.closure_count());
    for line in text.lines() {
        assert_eq!(line.split(" : ").count(), 3, "{line}");
    }
    assert!(text.lines().next().unwrap().starts_with("d0d1d2 : "));
}

#[test]
fn reads_from_disk_and_names_the_result_file() {
    let input = std::env::temp_dir().join(format!("skycube-reader-{}.txt", std::process::id()));
    fs::write(&input, "1 5\n3 3\n5 1\n").unwrap();
    let ds = DatasetReader::new().read_path(&input).unwrap();
    fs::remove_file(&input).unwrap();

    let prefs = ds.preferences().to_vec();
    let mut cube = Skycube::new(ds);
    let strategy = Strategy::Depth {
        full_subset_first: false,
    };
    cube.run(strategy).unwrap();
    let out = result_path(&input, strategy, &prefs);
    assert!(out.to_string_lossy().ends_with(".txt.dep.ll.res"));

    let missing = DatasetReader::new().read_path(&input).unwrap_err();
    assert!(matches!(missing, SkycubeError::Io(_)));
}

#[test]
fn stats_serialize_to_json() {
    let mut cube = Skycube::new(read_cars());
    let stats = cube.breadth_first(true).unwrap().clone();
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["processed"], 7);
    assert_eq!(json["closures"], 0);
    assert_eq!(json["comparisons"], stats.comparisons);
    let strategy = serde_json::to_string(&Strategy::BreadthDomain).unwrap();
    assert_eq!(
        serde_json::from_str::<Strategy>(&strategy).unwrap(),
        Strategy::BreadthDomain
    );
}
