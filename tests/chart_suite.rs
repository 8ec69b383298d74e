use std::path::{Path, PathBuf};

use league_graphs::layout::ChartKind;
use league_graphs::layout_dump::LayoutDump;
use league_graphs::{
    ChartLayout, Config, GenerateOptions, OutputFormat, build_layouts, generate_all, load_dataset,
    render_svg,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.starts_with("<?xml"), "{fixture}: missing xml declaration");
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.ends_with("</svg>"), "{fixture}: missing </svg tag");
    assert_eq!(
        svg.matches("<g ").count(),
        svg.matches("</g>").count(),
        "{fixture}: unbalanced groups"
    );
}

fn layouts_for(name: &str) -> Vec<ChartLayout> {
    let league = load_dataset(&fixture(name)).expect("fixture parse failed");
    build_layouts(&league, &Config::default(), &GenerateOptions::default())
        .expect("layout failed")
}

fn segment_ids(layout: &ChartLayout) -> Vec<&str> {
    layout.plot_segments().map(|s| s.id.as_str()).collect()
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = ["minho.json5", "reform.json5"];
    let theme = Config::default().theme;
    for rel in candidates {
        let layouts = layouts_for(rel);
        assert!(!layouts.is_empty(), "{rel}: no charts");
        for layout in &layouts {
            let svg = render_svg(layout, &theme);
            assert_valid_svg(&svg, rel);
        }
    }
}

#[test]
fn club_charts_come_before_derbies() {
    let layouts = layouts_for("minho.json5");
    let kinds: Vec<ChartKind> = layouts.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, vec![ChartKind::Club, ChartKind::Club, ChartKind::Derby]);
    assert_eq!(layouts[0].slug, "SCBraga");
    assert_eq!(layouts[1].slug, "VitoriaSC");
    assert_eq!(layouts[2].slug, "Derbi_do_Minho");
    assert_eq!(
        layouts[2].title,
        "\"Dérbi do Minho\" League Performances 1939 – 1942"
    );
}

#[test]
fn reform_jump_is_bridged() {
    let layouts = layouts_for("reform.json5");
    let amora = &layouts[0];
    assert_eq!(amora.title, "Amora FC League Performance 1990 – 1995");
    assert_eq!(amora.width, 122.0);
    assert_eq!(
        segment_ids(amora),
        vec!["AmoraFC1", "AmoraFC2", "AmoraFC3", "AmoraFC4"]
    );

    let paths: Vec<String> = amora.plot_segments().map(|s| s.path.to_svg()).collect();
    assert_eq!(
        paths,
        vec!["M45,76", "M45,76l12,65", "M57,141l12,-10", "M93,106l12,-10"]
    );
    let discontinuous: Vec<bool> = amora.plot_segments().map(|s| s.discontinuous).collect();
    assert_eq!(discontinuous, vec![false, true, false, false]);

    let svg = render_svg(amora, &Config::default().theme);
    assert!(svg.contains("stroke-dasharray=\"1,6\""));
    assert!(svg.contains("stroke-dasharray=\"10,10\""));
}

#[test]
fn lone_final_season_is_a_closed_point() {
    let layouts = layouts_for("reform.json5");
    let seixal = &layouts[1];
    let paths: Vec<String> = seixal.plot_segments().map(|s| s.path.to_svg()).collect();
    assert_eq!(paths, vec!["M105,186z"]);
}

#[test]
fn derby_overlays_members_in_listed_order() {
    let layouts = layouts_for("reform.json5");
    let derby = &layouts[2];
    assert_eq!(derby.kind, ChartKind::Derby);
    assert_eq!(
        segment_ids(derby),
        vec!["AmoraFC1", "AmoraFC2", "AmoraFC3", "AmoraFC4", "SeixalFC1"]
    );
    // Bottom tier is painted first so the top flight stays lightest.
    let tiers: Vec<usize> = derby.bands().map(|b| b.tier).collect();
    assert_eq!(tiers, vec![2, 1, 0]);
}

#[test]
fn output_is_deterministic() {
    let theme = Config::default().theme;
    let first: Vec<String> = layouts_for("reform.json5")
        .iter()
        .map(|l| render_svg(l, &theme))
        .collect();
    let second: Vec<String> = layouts_for("reform.json5")
        .iter()
        .map(|l| render_svg(l, &theme))
        .collect();
    assert_eq!(first, second);
}

#[test]
fn layout_dump_serializes() {
    let layouts = layouts_for("minho.json5");
    let dumps: Vec<LayoutDump> = layouts.iter().map(LayoutDump::from_layout).collect();
    let json = serde_json::to_value(&dumps).unwrap();
    assert_eq!(json[0]["kind"], "club");
    assert_eq!(json[2]["kind"], "derby");
    assert_eq!(json[0]["bands"].as_array().unwrap().len(), 2);
}

#[test]
fn generates_named_files() {
    let league = load_dataset(&fixture("reform.json5")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let options = GenerateOptions {
        out_dir: dir.path().to_path_buf(),
        format: OutputFormat::Svg,
        ..GenerateOptions::default()
    };
    let report = generate_all(&league, &Config::default(), &options).unwrap();
    assert_eq!(report.club_charts, 2);
    assert_eq!(report.derby_charts, 1);

    for rel in [
        "graphs-clubs/AmoraFC_League_Performance.svg",
        "graphs-clubs/SeixalFC_League_Performance.svg",
        "graphs-derbies/Derbi_do_Seixal_League_Performances.svg",
    ] {
        let path = dir.path().join(rel);
        assert!(path.exists(), "missing {rel}");
        let svg = std::fs::read_to_string(&path).unwrap();
        assert_valid_svg(&svg, rel);
    }
}

#[cfg(feature = "png")]
#[test]
fn generates_png_alongside_svg() {
    let league = load_dataset(&fixture("minho.json5")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let options = GenerateOptions {
        out_dir: dir.path().to_path_buf(),
        format: OutputFormat::Both,
        clubs: Some(["SC Braga".to_string()].into_iter().collect()),
        derbies: true,
    };
    let report = generate_all(&league, &Config::default(), &options).unwrap();
    assert_eq!(report.files.len(), 2);
    let png =
        std::fs::read(dir.path().join("graphs-clubs/SCBraga_League_Performance.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[cfg(feature = "png")]
#[test]
fn blocked_svg_leaves_no_png_behind() {
    let league = load_dataset(&fixture("minho.json5")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let clubs = dir.path().join("graphs-clubs");
    std::fs::create_dir_all(clubs.join("SCBraga_League_Performance.svg")).unwrap();
    let options = GenerateOptions {
        out_dir: dir.path().to_path_buf(),
        format: OutputFormat::Both,
        clubs: Some(["SC Braga".to_string()].into_iter().collect()),
        derbies: false,
    };
    assert!(generate_all(&league, &Config::default(), &options).is_err());
    assert!(!clubs.join("SCBraga_League_Performance.png").exists());
}

#[test]
fn malformed_dataset_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json5");
    std::fs::write(&path, r#"{ seasons: [2000, 2001], tierSizes: { "2000": [4] } }"#).unwrap();
    let err = load_dataset(&path).unwrap_err();
    let structural = err
        .downcast_ref::<league_graphs::LeagueError>()
        .expect("structural error");
    assert!(structural.to_string().contains("2001"));
}
