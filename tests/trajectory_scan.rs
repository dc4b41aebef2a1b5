use std::fs::File;
use std::io::{BufReader, Write};

use bio_bridge::io::{IoContext, read_pdb_trajectory};
use bio_bridge::ops::{
    BridgeConfig, BridgeScanner, FrameCursor, GeometricDetector, PresenceTable,
    render_presence_table,
};
use bio_bridge::select::{self, select_atoms};
use bio_bridge::{AtomSet, Trajectory};

type Atom = (&'static str, &'static str, char, i32, [f64; 3], &'static str);

fn atom_record(serial: usize, atom: &Atom) -> String {
    let (name, res_name, chain, res_seq, [x, y, z], element) = *atom;
    let record = if res_name == "SER" || res_name == "LYS" {
        "ATOM"
    } else {
        "HETATM"
    };
    format!(
        "{:<6}{:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        record, serial, name, res_name, chain, res_seq, x, y, z, 1.0, 0.0, element
    )
}

/// Ligand hydroxyl, one water, a serine and a distant lysine over three models:
/// a water-mediated bridge, a direct hydrogen bond, then no contact.
fn trajectory_pdb() -> String {
    let lysine = ("NZ", "LYS", 'A', 90, [20.0, 20.0, 20.0], "N");
    let models: [Vec<Atom>; 3] = [
        vec![
            ("O1", "LIG", 'L', 1, [0.0, 0.0, 0.0], "O"),
            ("H1", "LIG", 'L', 1, [0.97, 0.0, 0.0], "H"),
            ("OW", "HOH", 'W', 101, [2.8, 0.0, 0.0], "O"),
            ("HW1", "HOH", 'W', 101, [3.77, 0.0, 0.0], "H"),
            ("HW2", "HOH", 'W', 101, [2.5, 0.93, 0.0], "H"),
            ("OG", "SER", 'A', 42, [5.6, 0.0, 0.0], "O"),
            ("CB", "SER", 'A', 42, [6.6, 1.0, 0.0], "C"),
            lysine,
        ],
        vec![
            ("O1", "LIG", 'L', 1, [0.0, 0.0, 0.0], "O"),
            ("H1", "LIG", 'L', 1, [0.97, 0.0, 0.0], "H"),
            ("OW", "HOH", 'W', 101, [0.0, 8.0, 0.0], "O"),
            ("HW1", "HOH", 'W', 101, [0.97, 8.0, 0.0], "H"),
            ("HW2", "HOH", 'W', 101, [-0.3, 8.9, 0.0], "H"),
            ("OG", "SER", 'A', 42, [2.9, 0.0, 0.0], "O"),
            ("CB", "SER", 'A', 42, [3.9, 1.0, 0.0], "C"),
            lysine,
        ],
        vec![
            ("O1", "LIG", 'L', 1, [0.0, 0.0, 0.0], "O"),
            ("H1", "LIG", 'L', 1, [0.97, 0.0, 0.0], "H"),
            ("OW", "HOH", 'W', 101, [0.0, 8.0, 0.0], "O"),
            ("HW1", "HOH", 'W', 101, [0.97, 8.0, 0.0], "H"),
            ("HW2", "HOH", 'W', 101, [-0.3, 8.9, 0.0], "H"),
            ("OG", "SER", 'A', 42, [0.0, -9.0, 0.0], "O"),
            ("CB", "SER", 'A', 42, [0.0, -10.0, 0.0], "C"),
            lysine,
        ],
    ];

    let mut lines = vec!["REMARK   generated for bridge scan tests".to_string()];
    for (index, atoms) in models.iter().enumerate() {
        lines.push(format!("MODEL     {:>4}", index + 1));
        lines.extend(
            atoms
                .iter()
                .enumerate()
                .map(|(i, atom)| atom_record(i + 1, atom)),
        );
        lines.push("ENDMDL".to_string());
    }
    lines.push("END".to_string());
    lines.join("\n") + "\n"
}

fn load_from_tempfile() -> Trajectory {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(trajectory_pdb().as_bytes()).unwrap();
    file.flush().unwrap();

    let reader = BufReader::new(File::open(file.path()).unwrap());
    read_pdb_trajectory(reader, &IoContext::new_default()).unwrap()
}

fn selections(trajectory: &Trajectory) -> (AtomSet, AtomSet) {
    let first = trajectory.frame(0).unwrap();
    (
        select_atoms("resn LIG", &first).unwrap(),
        select_atoms("protein", &first).unwrap(),
    )
}

fn scan_to_csv(trajectory: &Trajectory, config: BridgeConfig) -> String {
    let (source, target) = selections(trajectory);
    let scanner = BridgeScanner::new(GeometricDetector::default()).with_config(config);
    let mut cursor = FrameCursor::new(trajectory).unwrap();

    let result = scanner
        .scan_trajectory(&mut cursor, &source, &target)
        .unwrap();
    assert_eq!(result.frame_count(), trajectory.frame_count());

    let mut out = Vec::new();
    render_presence_table(
        &mut out,
        trajectory.system(),
        &result.residues(),
        result.per_frame(),
    )
    .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn reads_three_models_with_shared_topology() {
    let trajectory = load_from_tempfile();
    let system = trajectory.system();

    assert_eq!(trajectory.frame_count(), 3);
    assert_eq!(system.atom_count(), 8);
    assert_eq!(system.residue_count(), 4);
    assert_eq!(system.residue_label(2).unwrap().to_string(), "A:SER42");
    assert!(system.residue(1).unwrap().is_water());
}

#[test]
fn water_mediated_and_direct_bridges_fill_the_presence_table() {
    let trajectory = load_from_tempfile();

    let csv = scan_to_csv(&trajectory, BridgeConfig::default());

    assert_eq!(csv, "frame,A:SER42\n0,1\n1,1\n2,0\ntotal,2\n");
}

#[test]
fn disallowing_waters_keeps_only_direct_contacts() {
    let trajectory = load_from_tempfile();
    let config = BridgeConfig {
        max_waters: 0,
        ..BridgeConfig::default()
    };

    let csv = scan_to_csv(&trajectory, config);

    assert_eq!(csv, "frame,A:SER42\n0,0\n1,1\n2,0\ntotal,1\n");
}

#[test]
fn water_bridge_path_goes_through_the_water_residue() {
    let trajectory = load_from_tempfile();
    let (source, target) = selections(&trajectory);
    let scanner = BridgeScanner::new(GeometricDetector::default());

    let paths = scanner
        .find_bridges(&trajectory.frame(0).unwrap(), &source, &target)
        .unwrap();

    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].residues(), &[0, 1, 2]);
}

#[test]
fn per_frame_selections_follow_moving_waters() {
    let trajectory = load_from_tempfile();
    let source_expr = select::parse("water and within 3.0 of resn LIG").unwrap();
    let target_expr = select::parse("protein").unwrap();
    let scanner = BridgeScanner::new(GeometricDetector::default());
    let mut cursor = FrameCursor::new(&trajectory).unwrap();

    let result = scanner
        .scan_trajectory_with(
            &mut cursor,
            |frame| {
                Ok((
                    select::evaluate(&source_expr, frame.system(), Some(frame))?,
                    select::evaluate(&target_expr, frame.system(), Some(frame))?,
                ))
            },
            |_| {},
        )
        .unwrap();

    let per_frame: Vec<Vec<usize>> = result
        .per_frame()
        .iter()
        .map(|frame| frame.terminals().to_vec())
        .collect();
    assert_eq!(per_frame, vec![vec![2], vec![], vec![]]);
}

#[test]
fn presence_table_can_be_written_to_a_file() {
    let trajectory = load_from_tempfile();
    let (source, target) = selections(&trajectory);
    let scanner = BridgeScanner::new(GeometricDetector::default());
    let mut cursor = FrameCursor::new(&trajectory).unwrap();
    let result = scanner
        .scan_trajectory(&mut cursor, &source, &target)
        .unwrap();
    let table =
        PresenceTable::from_frames(trajectory.system(), &result.residues(), result.per_frame())
            .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presence.csv");
    let mut file = File::create(&path).unwrap();
    table.write_csv(&mut file).unwrap();
    drop(file);

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().last(), Some("total,2"));
    assert_eq!(table.totals(), vec![2]);
}
