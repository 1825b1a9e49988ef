use serial_test::serial;
use std::env::{remove_var, set_var};
use std::fs::{read_to_string, write};
use std::path::PathBuf;

use tartrace::config::{PREFIX_VAR, VERBOSITY_VAR};
use tartrace::{trace, TraceError, TracerConfig};

const COMMITS: &str = r#"
{"tick": 1000, "pc": {"addr": 32768}, "inst": {"opcode": 3819962373, "disassembly": "movs r0, #5", "dest_regs": [{"class": "integer", "index": 0}, {"class": "condcode", "index": 0}]}, "regs": {"misc": {"0": 467}, "cc": {"0": 0, "1": 0, "2": 0, "3": 0}, "int": {"0": 5}}}

{"tick": 1500, "pc": {"addr": 32772}, "inst": {"opcode": 3851493376, "disassembly": "ldr r2, [r1]", "dest_regs": [{"class": "integer", "index": 2}]}, "mem": [{"kind": "load", "addr": 4096, "size": 4, "data": 48879}], "regs": {"misc": {"0": 467}, "int": {"2": 48879}}}
{"tick": 2000, "cpu": "cpu1", "pc": {"addr": 32776}, "secure": true, "inst": {"opcode": 3810586624, "disassembly": "nop"}, "regs": {"misc": {"0": 467}}}
"#;

fn tmp(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name)
}

#[test]
#[serial]
fn test_trace_replay() {
    let input = tmp("commits.jsonl");
    let output = tmp("commits.tarmac");
    write(&input, COMMITS).expect("Failed to write commits");

    let count = trace(input, Some(output.clone()), TracerConfig::default()).unwrap();
    assert_eq!(count, 3);

    let out = read_to_string(output).unwrap();
    assert_eq!(
        out.lines().collect::<Vec<&str>>(),
        vec![
            "1000 clk IT (1) 00008000 e3b00005 A svc_ns : MOVS R0, #5",
            "1000 clk cpu0 R r0 00000005",
            "1000 clk cpu0 R cpsr 000001d3",
            "1500 clk IT (2) 00008004 e5912000 A svc_ns : LDR R2, [R1]",
            "1500 clk cpu0 MR4 00001000 0000beef",
            "1500 clk cpu0 R r2 0000beef",
            "2000 clk IT (3) 00008008 e320f000 A svc_s : NOP",
        ]
    );
}

#[test]
#[serial]
fn test_trace_malformed_line() {
    let input = tmp("malformed.jsonl");
    write(&input, "{\"tick\": 1}\n").expect("Failed to write commits");

    let res = trace(input, Some(tmp("malformed.tarmac")), TracerConfig::default());
    assert!(matches!(res, Err(TraceError::Snapshot(_))));
}

#[test]
#[serial]
fn test_config_from_env() {
    set_var(VERBOSITY_VAR, "2");
    set_var(PREFIX_VAR, "core0: ");
    assert_eq!(TracerConfig::from_env(), TracerConfig::new(2, "core0: "));

    set_var(VERBOSITY_VAR, "loud");
    assert_eq!(TracerConfig::from_env().verbosity, 0);

    remove_var(VERBOSITY_VAR);
    remove_var(PREFIX_VAR);
    assert_eq!(TracerConfig::from_env(), TracerConfig::default());
}
