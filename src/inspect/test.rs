use super::*;

fn snapshot_at<'a>(pc: Word, memory: &'a [Word], labels: &'a LabelTable) -> Snapshot<'a> {
    Snapshot {
        registers: Registers {
            acc: 255,
            ix: 3,
            pc,
            flag: 1,
        },
        memory,
        labels,
    }
}

#[test]
fn window_is_centred_on_pc() {
    let memory = vec![0; 64];
    let labels = LabelTable::new();
    assert_eq!(snapshot_at(20, &memory, &labels).window(), 15..26);
}

#[test]
fn window_clips_to_memory() {
    let memory = vec![0; 16];
    let labels = LabelTable::new();
    assert_eq!(snapshot_at(2, &memory, &labels).window(), 0..8);
    assert_eq!(snapshot_at(14, &memory, &labels).window(), 9..16);
    // PC just past the end after fetching the last pair
    assert_eq!(snapshot_at(16, &memory, &labels).window(), 11..16);
    assert_eq!(snapshot_at(21, &memory, &labels).window(), 16..16);
    assert!(snapshot_at(Word::MAX, &memory, &labels).window().is_empty());
}

#[test]
fn far_jump_target_shows_no_memory_rows() {
    let memory = vec![0; 1024];
    let labels = LabelTable::new();
    let snapshot = snapshot_at(5000, &memory, &labels);
    assert!(snapshot.window().is_empty());
    let text = snapshot.report().to_string();
    assert!(!text.contains("Mem["), "{text}");
    assert!(text.contains("|  PC |  0x0000000000001388 |"), "{text}");
}

#[test]
fn report_shows_registers_in_hex_and_decimal() {
    let memory = vec![0; 16];
    let labels = LabelTable::new();
    let text = snapshot_at(4, &memory, &labels).report().to_string();
    assert!(text.contains("| ACC |  0x00000000000000ff | 00000000000000000255 |"), "{text}");
    assert!(text.contains("| FLG |  0x0000000000000001 | 00000000000000000001 |"), "{text}");
}

#[test]
fn report_marks_pc_and_labels() {
    let mut memory = vec![0; 16];
    memory[6] = 0xAB;
    let mut labels = LabelTable::new();
    labels.define("data", 6).unwrap();
    labels.define("far", 15).unwrap();
    let text = snapshot_at(4, &memory, &labels).report().to_string();

    let pc_row = text.lines().find(|l| l.contains("Mem[0004]")).unwrap();
    assert!(pc_row.ends_with("<-- PC"), "{pc_row}");
    let data_row = text.lines().find(|l| l.contains("Mem[0006]")).unwrap();
    assert!(data_row.contains("0x00000000000000ab"));
    assert!(data_row.ends_with("  data"), "{data_row}");
    // outside the window
    assert!(!text.contains("far"));
    assert_eq!(text.lines().filter(|l| l.starts_with("| Mem[")).count(), 10);
}

#[test]
fn closures_are_inspectors() {
    let memory = vec![7; 4];
    let labels = LabelTable::new();
    let mut seen = vec![];
    let mut inspector = |snapshot: &Snapshot<'_>| seen.push(snapshot.registers.acc);
    inspector.inspect(&snapshot_at(0, &memory, &labels));
    assert_eq!(seen, vec![255]);
}

#[test]
fn report_inspector_writes_the_report() {
    let memory = vec![0; 8];
    let labels = LabelTable::new();
    let mut inspector = ReportInspector::new(Vec::new());
    inspector.inspect(&snapshot_at(0, &memory, &labels));
    let text = String::from_utf8(inspector.into_inner()).unwrap();
    assert!(text.contains("VM State"));
    assert!(text.contains("Mem[0000]"));
}
