//! Tests for argument handling and the lookup command.

#[cfg(test)]
mod args {
    use std::fs;
    use std::path::PathBuf;

    use clap::Parser;
    use wg_pipeline::LocatorKind;

    use crate::{resolve_config, Cli, Command, Locator};

    #[test]
    fn build_flags_parse() {
        let cli = Cli::try_parse_from([
            "waygraph", "-v", "build", "--roads", "r.geojson", "--buildings", "b.geojson",
            "--out-dir", "out", "--locator", "rtree",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Command::Build { roads, out_dir, locator, adjacency_file, .. } = cli.cmd else {
            panic!("expected build");
        };
        assert_eq!(roads, PathBuf::from("r.geojson"));
        assert_eq!(out_dir, Some(PathBuf::from("out")));
        assert_eq!(locator, Some(Locator::Rtree));
        assert_eq!(adjacency_file, None);
    }

    #[test]
    fn lookup_requires_names() {
        assert!(Cli::try_parse_from(["waygraph", "lookup", "--mapping", "m.csv"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{ "out_dir": "from-file", "mapping_file": "names.csv", "locator": "rtree" }"#)
            .unwrap();

        let cfg = resolve_config(Some(&path), Some("from-flag".into()), None, None, Some(Locator::Linear))
            .unwrap();
        assert_eq!(cfg.out_dir, PathBuf::from("from-flag"));
        assert_eq!(cfg.mapping_file, "names.csv");
        assert_eq!(cfg.adjacency_file, "adj_list.csv");
        assert_eq!(cfg.locator, LocatorKind::Linear);
    }

    #[test]
    fn clashing_file_names_rejected() {
        let r = resolve_config(None, None, Some("x.csv".into()), Some("x.csv".into()), None);
        assert!(r.is_err());
    }
}

#[cfg(test)]
mod lookup {
    use std::fs;

    use crate::lookup;

    fn mapping_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("building_mapping.csv");
        fs::write(&path, "building_name,node_id\nHall,2\n\"Hall, North\",3\n").unwrap();
        path
    }

    #[test]
    fn prints_rows_in_argument_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = mapping_file(&dir);
        let mut out = Vec::new();
        lookup(&path, &["Hall, North".to_owned(), "Hall".to_owned()], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"Hall, North\",3\nHall,2\n");
    }

    #[test]
    fn unknown_name_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = mapping_file(&dir);
        let mut out = Vec::new();
        let err = lookup(&path, &["Hall".to_owned(), "hall".to_owned()], &mut out).unwrap_err();
        assert!(err.to_string().contains("hall"));
        assert!(out.is_empty());
    }
}
