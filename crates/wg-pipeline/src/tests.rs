//! Unit tests for wg-pipeline.

#[cfg(test)]
mod helpers {
    use wg_core::{GeoPoint, NodeId};
    use wg_graph::{Edge, Graph, NodeKind};

    use crate::{PipelineObserver, PipelineReport, Stage, StageReport};

    /// Road 10 → 20 along the meridian, 0.001° long, no stored length.
    pub fn hall_graph() -> Graph {
        let mut g = Graph::new();
        g.add_node(NodeId(10), GeoPoint::new(0.0, 0.0), NodeKind::Road).unwrap();
        g.add_node(NodeId(20), GeoPoint::new(0.001, 0.0), NodeKind::Road).unwrap();
        g.add_edge(Edge { from: NodeId(10), to: NodeId(20), length_m: None, geometry: None })
            .unwrap();
        g
    }

    /// `side × side` lattice with 0.001° spacing and two-way streets.
    pub fn grid(side: u64) -> Graph {
        let mut g = Graph::new();
        let id = |r: u64, c: u64| NodeId(r * side + c);
        for r in 0..side {
            for c in 0..side {
                let pos = GeoPoint::from_xy(c as f64 * 0.001, r as f64 * 0.001);
                g.add_node(id(r, c), pos, NodeKind::Road).unwrap();
            }
        }
        for r in 0..side {
            for c in 0..side {
                if c + 1 < side {
                    g.connect(id(r, c), id(r, c + 1), 111.0).unwrap();
                    g.connect(id(r, c + 1), id(r, c), 111.0).unwrap();
                }
                if r + 1 < side {
                    g.connect(id(r, c), id(r + 1, c), 111.0).unwrap();
                    g.connect(id(r + 1, c), id(r, c), 111.0).unwrap();
                }
            }
        }
        g
    }

    #[derive(Default)]
    pub struct Recorder {
        pub started:  Vec<Stage>,
        pub ended:    Vec<StageReport>,
        pub anchors:  Vec<(String, NodeId)>,
        pub finished: bool,
    }

    impl PipelineObserver for Recorder {
        fn on_stage_start(&mut self, stage: Stage) {
            self.started.push(stage);
        }

        fn on_stage_end(&mut self, report: &StageReport) {
            self.ended.push(*report);
        }

        fn on_anchor(&mut self, name: &str, node: NodeId) {
            self.anchors.push((name.to_owned(), node));
        }

        fn on_finish(&mut self, _report: &PipelineReport) {
            self.finished = true;
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use std::path::PathBuf;

    use crate::{LocatorKind, PipelineConfig};

    #[test]
    fn defaults() {
        let c = PipelineConfig::default();
        assert_eq!(c.out_dir, PathBuf::from("."));
        assert_eq!(c.adjacency_file, "adj_list.csv");
        assert_eq!(c.mapping_file, "building_mapping.csv");
        assert_eq!(c.locator, LocatorKind::Linear);
        assert_eq!(c.adjacency_path(), PathBuf::from("./adj_list.csv"));
    }

    #[test]
    fn partial_document_fills_defaults() {
        let c: PipelineConfig =
            serde_json::from_str(r#"{ "out_dir": "build", "locator": "rtree" }"#).unwrap();
        assert_eq!(c.out_dir, PathBuf::from("build"));
        assert_eq!(c.locator, LocatorKind::Rtree);
        assert_eq!(c.mapping_file, "building_mapping.csv");
    }

    #[test]
    fn unknown_locator_rejected() {
        let r: Result<PipelineConfig, _> = serde_json::from_str(r#"{ "locator": "grid" }"#);
        assert!(r.is_err());
    }

    #[test]
    fn locator_display() {
        assert_eq!(LocatorKind::Linear.to_string(), "linear");
        assert_eq!(LocatorKind::Rtree.to_string(), "rtree");
    }
}

// ── Build stages ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod build {
    use wg_core::{GeoPoint, NodeId};
    use wg_graph::{Edge, Graph, GraphError, NodeKind, PointOfInterest};

    use super::helpers::{grid, hall_graph, Recorder};
    use crate::{LocatorKind, NoopObserver, Pipeline, PipelineConfig, PipelineError, Stage};

    fn hall() -> PointOfInterest {
        PointOfInterest::new("Hall", GeoPoint::from_xy(0.00005, 0.0005))
    }

    #[test]
    fn hall_example() {
        let mut obs = Recorder::default();
        let built = Pipeline::default().build(hall_graph(), &[hall()], &mut obs).unwrap();

        assert_eq!(built.mapping.get("Hall"), Some(NodeId(2)));
        assert_eq!(built.adjacency.edge_count(), 4);
        assert_eq!(built.adjacency.node_count(), 3);
        assert_eq!(obs.anchors, [("Hall".to_owned(), NodeId(2))]);

        let r = &built.report;
        assert_eq!((r.raw_nodes, r.raw_edges), (2, 1));
        assert_eq!(r.anchors, 1);
        assert_eq!(r.recomputed_weights, 0);
        assert_eq!((r.final_nodes, r.final_edges), (3, 4));
    }

    #[test]
    fn stages_reported_in_order() {
        let mut obs = Recorder::default();
        let built = Pipeline::default().build(hall_graph(), &[hall()], &mut obs).unwrap();

        let order = [Stage::Split, Stage::Sanitize, Stage::Anchor, Stage::Adjacency];
        assert_eq!(obs.started, order);
        let ended: Vec<_> = obs.ended.iter().map(|s| s.stage).collect();
        assert_eq!(ended, order);
        assert_eq!(built.report.stages.len(), 4);
        // After anchoring: 3 nodes, 4 edges.
        assert_eq!((obs.ended[2].nodes, obs.ended[2].edges), (3, 4));
        assert!(!obs.finished);
    }

    #[test]
    fn curved_edge_split_before_anchoring() {
        let verts = [
            GeoPoint::from_xy(0.0, 0.0),
            GeoPoint::from_xy(0.001, 0.001),
            GeoPoint::from_xy(0.002, 0.001),
            GeoPoint::from_xy(0.003, 0.0),
        ];
        let mut g = Graph::new();
        g.add_node(NodeId(5), verts[0], NodeKind::Road).unwrap();
        g.add_node(NodeId(9), verts[3], NodeKind::Road).unwrap();
        g.add_edge(Edge { from: NodeId(5), to: NodeId(9), length_m: Some(400.0), geometry: Some(verts.to_vec()) })
            .unwrap();

        let built = Pipeline::default().build(g, &[], &mut NoopObserver).unwrap();
        let r = &built.report;
        assert_eq!((r.split.edges_split, r.split.edges_created, r.split.nodes_created), (1, 3, 2));
        assert_eq!(r.sanitize.node_count, 4);
        assert_eq!(built.adjacency.edge_count(), 3);

        let path: f64 = verts.windows(2).map(|w| w[0].distance_m(w[1])).sum();
        let total: f64 = built.adjacency.triples().map(|(.., w)| w).sum();
        assert!((total - path).abs() < 1e-6, "{total} vs {path}");
        assert!(total > verts[0].distance_m(verts[3]));
    }

    #[test]
    fn ids_are_dense_after_build() {
        let built = Pipeline::default().build(hall_graph(), &[hall()], &mut NoopObserver).unwrap();
        let mut ids: Vec<u64> = built.graph.nodes().map(|n| n.id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, [0, 1, 2]);
    }

    #[test]
    fn no_edges_is_fatal() {
        let mut g = Graph::new();
        g.add_node(NodeId(0), GeoPoint::new(0.0, 0.0), NodeKind::Road).unwrap();
        let err = Pipeline::default().build(g, &[hall()], &mut NoopObserver).unwrap_err();
        assert!(matches!(err, PipelineError::Graph(GraphError::NoEdges { .. })));
    }

    #[test]
    fn no_points_of_interest_is_fine() {
        let built = Pipeline::default().build(hall_graph(), &[], &mut NoopObserver).unwrap();
        assert!(built.mapping.is_empty());
        assert_eq!(built.adjacency.edge_count(), 1);
        assert_eq!(built.report.recomputed_weights, 1);
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = Pipeline::default()
            .build(hall_graph(), &[hall(), hall()], &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Graph(GraphError::DuplicateName(_))));
    }

    #[test]
    fn locators_agree() {
        let pois: Vec<_> = [
            (0.0005, 0.0005), // centre of a cell: four-way tie
            (0.0012, 0.0021),
            (0.0031, 0.0004),
            (-0.0010, 0.0015),
            (0.0015, 0.0015),
            (0.00151, 0.0015), // next to the previous anchor
        ]
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| PointOfInterest::new(format!("b{i}"), GeoPoint::from_xy(x, y)))
        .collect();

        let run = |locator| {
            let p = Pipeline::new(PipelineConfig { locator, ..PipelineConfig::default() });
            p.build(grid(4), &pois, &mut NoopObserver).unwrap()
        };
        let linear = run(LocatorKind::Linear);
        let rtree = run(LocatorKind::Rtree);

        let a: Vec<_> = linear.adjacency.triples().collect();
        let b: Vec<_> = rtree.adjacency.triples().collect();
        assert_eq!(a, b);
        let ma: Vec<_> = linear.mapping.iter().collect();
        let mb: Vec<_> = rtree.mapping.iter().collect();
        assert_eq!(ma, mb);
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod end_to_end {
    use std::collections::HashSet;
    use std::fs;
    use std::path::Path;

    use wg_output::{read_adjacency, read_mapping};

    use super::helpers::Recorder;
    use crate::{Pipeline, PipelineConfig, PipelineError, Stage};

    const ROADS: &str = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "id": 10 },
          "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } },
        { "type": "Feature", "properties": { "id": 20 },
          "geometry": { "type": "Point", "coordinates": [0.0, 0.001] } },
        { "type": "Feature", "properties": { "id": 30 },
          "geometry": { "type": "Point", "coordinates": [0.002, 0.001] } },
        { "type": "Feature", "properties": { "u": 10, "v": 20 }, "geometry": null },
        { "type": "Feature", "properties": { "u": 20, "v": 30, "length": 230.0 },
          "geometry": { "type": "LineString",
                        "coordinates": [[0.0, 0.001], [0.001, 0.0012], [0.002, 0.001]] } },
        { "type": "Feature", "properties": { "u": 30, "v": 30, "length": 5.0 }, "geometry": null }
    ] }"#;

    const BUILDINGS: &str = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "name": "Hall" },
          "geometry": { "type": "Point", "coordinates": [0.00005, 0.0005] } },
        { "type": "Feature", "properties": { "name": "Library" },
          "geometry": { "type": "Polygon", "coordinates":
            [[[0.0014, 0.0012], [0.0016, 0.0012], [0.0016, 0.0014], [0.0014, 0.0014], [0.0014, 0.0012]]] } },
        { "type": "Feature", "properties": { "name": "Hall" },
          "geometry": { "type": "Point", "coordinates": [0.002, 0.002] } },
        { "type": "Feature", "properties": {},
          "geometry": { "type": "Point", "coordinates": [0.002, 0.002] } }
    ] }"#;

    fn inputs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
        let roads = dir.join("roads.geojson");
        let buildings = dir.join("buildings.geojson");
        fs::write(&roads, ROADS).unwrap();
        fs::write(&buildings, BUILDINGS).unwrap();
        (roads, buildings)
    }

    #[test]
    fn files_written_and_consistent() {
        let dir = tempfile::tempdir().unwrap();
        let (roads, buildings) = inputs(dir.path());
        let out = dir.path().join("out");
        let pipeline = Pipeline::new(PipelineConfig { out_dir: out.clone(), ..PipelineConfig::default() });

        let mut obs = Recorder::default();
        let report = pipeline.run(&roads, &buildings, &mut obs).unwrap();
        assert!(obs.finished);
        assert_eq!(obs.started.last(), Some(&Stage::Export));

        // 3 raw nodes + 1 interior vertex, self-loop dropped.
        assert_eq!(report.sanitize.node_count, 4);
        assert_eq!(report.sanitize.self_loops_removed, 1);
        assert_eq!(report.anchors, 2);
        // 4 straight edges left, each anchor swaps one for four.
        assert_eq!(report.final_edges, 9);

        let rows = read_adjacency(&out.join("adj_list.csv")).unwrap();
        assert_eq!(rows.len(), report.final_edges);
        assert!(rows.iter().all(|r| r.src != r.dst && r.length >= 0.0));

        let table = read_mapping(&out.join("building_mapping.csv")).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.node_for("Hall"), Some(wg_core::NodeId(4)));
        assert_eq!(table.node_for("Library"), Some(wg_core::NodeId(5)));

        let mut nodes: HashSet<u64> = HashSet::new();
        for r in &rows {
            nodes.insert(r.src);
            nodes.insert(r.dst);
        }
        assert!(table.rows().iter().all(|m| nodes.contains(&m.node_id)));
        let expected: HashSet<u64> = (0..6).collect();
        assert_eq!(nodes, expected);
    }

    #[test]
    fn rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let (roads, buildings) = inputs(dir.path());
        let pipeline = Pipeline::new(PipelineConfig { out_dir: dir.path().into(), ..PipelineConfig::default() });

        pipeline.run(&roads, &buildings, &mut Recorder::default()).unwrap();
        let adj = fs::read(dir.path().join("adj_list.csv")).unwrap();
        let map = fs::read(dir.path().join("building_mapping.csv")).unwrap();

        pipeline.run(&roads, &buildings, &mut Recorder::default()).unwrap();
        assert_eq!(adj, fs::read(dir.path().join("adj_list.csv")).unwrap());
        assert_eq!(map, fs::read(dir.path().join("building_mapping.csv")).unwrap());
    }

    #[test]
    fn failed_run_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let roads = dir.path().join("roads.geojson");
        let buildings = dir.path().join("buildings.geojson");
        fs::write(
            &roads,
            r#"{ "type": "FeatureCollection", "features": [
                { "type": "Feature", "properties": { "id": 1 },
                  "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } } ] }"#,
        )
        .unwrap();
        fs::write(&buildings, BUILDINGS).unwrap();
        fs::write(dir.path().join("adj_list.csv"), "stale").unwrap();
        fs::write(dir.path().join("building_mapping.csv"), "stale").unwrap();

        let pipeline = Pipeline::new(PipelineConfig { out_dir: dir.path().into(), ..PipelineConfig::default() });
        let err = pipeline.run(&roads, &buildings, &mut Recorder::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Graph(_)));
        assert!(!dir.path().join("adj_list.csv").exists());
        assert!(!dir.path().join("building_mapping.csv").exists());
        assert!(!dir.path().join("adj_list.csv.partial").exists());
    }

    #[test]
    fn missing_input_reported() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(PipelineConfig { out_dir: dir.path().into(), ..PipelineConfig::default() });
        let err = pipeline
            .run(&dir.path().join("nope.geojson"), &dir.path().join("nope2.geojson"), &mut Recorder::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Source(_)));
    }
}
