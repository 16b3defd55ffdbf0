use std::fs;
use std::path::Path;

use dgeumi::command::{Demux, DemuxParams};
use dgeumi::demux::DemuxMode;
use dgeumi::fileformat::fastq::{parse_composite_id, FastqParseOptions};
use dgeumi::fileformat::FastqPathPair;
use dgeumi::utils::LineEnding;
use tempfile::TempDir;

const R1: &str = "@NB501:42:HXXXBGX:4:11401:10000:2000 1:N:0:ATCACG
AAAAAAGGGGGGGGGGTTTTTTTTTT
+
IIIIIIIIIIIIIIIIIIIIIIIIII
";

const R2: &str = "@NB501:42:HXXXBGX:4:11401:10000:2000 2:N:0:ATCACG
CATCATCATCAT
+
ABCDEFGHIJKL
";

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn params(dir: &TempDir, r1: &str, r2: &str, capacity: usize) -> DemuxParams {
    let barcodes = write(dir.path(), "barcodes.tsv", "P1\t1\tAAAAAA\nP1\t2\tCCCCCC\n");
    DemuxParams {
        path_barcodes: barcodes,
        pairs: vec![FastqPathPair {
            r1: write(dir.path(), "in_R1.fastq", r1),
            r2: write(dir.path(), "in_R2.fastq", r2),
        }],
        path_out: dir.path().join("out"),
        main_name: "sample".to_string(),
        mode: DemuxMode::Composite,
        batch_size: 131072,
        group_capacity: capacity,
        flush_stream: true,
        fastq_opts: FastqParseOptions::default(),
        line_ending: LineEnding::Unix,
    }
}

#[test]
fn one_pair_lands_in_its_well() {
    let dir = TempDir::new().unwrap();
    let p = params(&dir, R1, R2, 131072);
    let stats = Demux::run(&p).unwrap();
    assert_eq!(stats.grouped, 1);
    assert_eq!(stats.ungrouped, 0);

    let well_1 = fs::read_to_string(p.path_out.join("sample.1.fastq")).unwrap();
    let lines: Vec<&str> = well_1.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "@NB501:42:HXXXBGX:4:11401:10000:2000:AAAAAAGGGGGGGGGG"
    );
    assert_eq!(lines[1], "CATCATCATCAT");
    assert_eq!(lines[2], "+");
    assert_eq!(lines[3], "ABCDEFGHIJKL");

    let well_2 = fs::read_to_string(p.path_out.join("sample.2.fastq")).unwrap();
    assert!(well_2.is_empty());
}

#[test]
fn composite_identifier_decodes_to_read_1_fields() {
    let dir = TempDir::new().unwrap();
    let p = params(&dir, R1, R2, 131072);
    Demux::run(&p).unwrap();
    let well_1 = fs::read_to_string(p.path_out.join("sample.1.fastq")).unwrap();
    let id = well_1.lines().next().unwrap();
    let (pos, barcode) = parse_composite_id(id).unwrap();
    assert_eq!(pos.instrument, "NB501");
    assert_eq!(pos.run, 42);
    assert_eq!(pos.flowcell, "HXXXBGX");
    assert_eq!((pos.lane, pos.tile, pos.x, pos.y), (4, 11401, 10000, 2000));
    assert_eq!(barcode.well, "AAAAAA");
    assert_eq!(barcode.umi, "GGGGGGGGGG");
}

#[test]
fn every_record_written_once_with_small_buffers() {
    let mut r1 = String::new();
    let mut r2 = String::new();
    for i in 0..25 {
        let well = if i % 3 == 0 { "CCCCCC" } else { "AAAAAA" };
        let well = if i % 5 == 0 { "GGGGGG" } else { well };
        r1.push_str(&format!(
            "@I:1:F:1:1:1:{} 1:N:0:A\n{}TTTTTTTTTT\n+\nIIIIIIIIIIIIIIII\n",
            i, well
        ));
        r2.push_str(&format!("@I:1:F:1:1:1:{} 2:N:0:A\nACGT\n+\nIIII\n", i));
    }

    let dir = TempDir::new().unwrap();
    let p = params(&dir, &r1, &r2, 2);
    let stats = Demux::run(&p).unwrap();
    // i % 5 == 0 has no well: 0, 5, 10, 15, 20
    assert_eq!(stats.ungrouped, 5);
    assert_eq!(stats.grouped, 20);

    let count = |name: &str| {
        fs::read_to_string(p.path_out.join(name))
            .unwrap()
            .lines()
            .count()
            / 4
    };
    // i % 3 == 0 and i % 5 != 0: 3, 6, 9, 12, 18, 21, 24
    assert_eq!(count("sample.2.fastq"), 7);
    assert_eq!(count("sample.1.fastq"), 13);
}

#[test]
fn malformed_pair_is_skipped() {
    let r1 = format!("{}@NB501:42:HXXXBGX:4:11401:1:1 1:N:0:ATCACG\nAAAA\n+\nIIII\n", R1);
    let r2 = format!("{}@NB501:42:HXXXBGX:4:11401:1:1 2:N:0:ATCACG\nACGT\n+\nIIII\n", R2);
    let dir = TempDir::new().unwrap();
    let stats = Demux::run(&params(&dir, &r1, &r2, 10)).unwrap();
    assert_eq!(stats.grouped, 1);
    assert_eq!(stats.skipped, 1);
}

#[test]
fn paired_index_mode_writes_both_reads() {
    let r1 = "@I:1:F:1:1:1:1 1:N:0:CCCCCC\nACGT\n+\nIIII\n";
    let r2 = "@I:1:F:1:1:1:1 2:N:0:CCCCCC\nTTTT\n+\nJJJJ\n";
    let dir = TempDir::new().unwrap();
    let mut p = params(&dir, r1, r2, 10);
    p.mode = DemuxMode::PairedIndex;
    let stats = Demux::run(&p).unwrap();
    assert_eq!(stats.grouped, 1);
    assert_eq!(
        fs::read_to_string(p.path_out.join("sample.R1.2.fastq")).unwrap(),
        r1
    );
    assert_eq!(
        fs::read_to_string(p.path_out.join("sample.R2.2.fastq")).unwrap(),
        r2
    );
    assert!(p.path_out.join("sample.R1.1.fastq").exists());
}

#[test]
fn duplicate_barcode_aborts() {
    let dir = TempDir::new().unwrap();
    let mut p = params(&dir, R1, R2, 10);
    p.path_barcodes = write(dir.path(), "dup.tsv", "P1\t1\tAAAAAA\nP1\t2\tAAAAAA\n");
    assert!(Demux::run(&p).is_err());
}

#[test]
fn short_identifier_is_skipped_not_written() {
    let r1 = format!(
        "{}@NB501:42:HX:4 1:N:0:ATCACG\nAAAAAACCCCCCCCCCTT\n+\nIIIIIIIIIIIIIIIIII\n",
        R1
    );
    let r2 = format!("{}@NB501:42:HX:4 2:N:0:ATCACG\nACGT\n+\nIIII\n", R2);
    let dir = TempDir::new().unwrap();
    let p = params(&dir, &r1, &r2, 10);
    let stats = Demux::run(&p).unwrap();
    assert_eq!(stats.grouped, 1);
    assert_eq!(stats.skipped, 1);

    let well_1 = fs::read_to_string(p.path_out.join("sample.1.fastq")).unwrap();
    assert_eq!(well_1.lines().count(), 4);
    for id in well_1.lines().step_by(4) {
        assert!(parse_composite_id(id).is_ok());
    }
}

#[test]
fn unopenable_well_output_is_fatal() {
    let dir = TempDir::new().unwrap();
    let p = params(&dir, R1, R2, 10);
    // a directory where the well 2 output file should be created
    fs::create_dir_all(p.path_out.join("sample.2.fastq")).unwrap();
    assert!(Demux::run(&p).is_err());

    let well_1 = p.path_out.join("sample.1.fastq");
    assert!(!well_1.exists() || fs::read_to_string(well_1).unwrap().is_empty());
}

#[test]
fn output_directory_that_is_a_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut p = params(&dir, R1, R2, 10);
    p.path_out = write(dir.path(), "not_a_dir", "");
    assert!(Demux::run(&p).is_err());
}
