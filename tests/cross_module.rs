//! Cross-crate tests: full dumps that exercise the resolver, walker,
//! decoders, extent inference, and disassembler together.

use acsdump::dump;
use acsdump_object::{resolve_layout, ObjectBuffer};
use acsdump_spec::ChunkTag;

fn push_i32(data: &mut Vec<u8>, value: i32) {
    data.extend_from_slice(&value.to_le_bytes());
}

fn push_i16(data: &mut Vec<u8>, value: i16) {
    data.extend_from_slice(&value.to_le_bytes());
}

fn push_chunk(data: &mut Vec<u8>, name: &[u8; 4], body: &[u8]) {
    data.extend_from_slice(name);
    push_i32(data, body.len() as i32);
    data.extend_from_slice(body);
}

fn direct_sptr_entry(body: &mut Vec<u8>, number: i16, stype: i16, offset: i32, params: i32) {
    push_i16(body, number);
    push_i16(body, stype);
    push_i32(body, offset);
    push_i32(body, params);
}

// Direct ACSE file with two scripts and one function:
//   script 1 at 8:  pushnumber 42; terminate
//   func 0 at 20:   returnvoid
//   script 2 at 24: terminate
fn build_full_acse() -> Vec<u8> {
    let mut data = b"ACSE".to_vec();
    push_i32(&mut data, 28);
    push_i32(&mut data, 3); // pushnumber
    push_i32(&mut data, 42);
    push_i32(&mut data, 1); // terminate
    push_i32(&mut data, 205); // returnvoid (function body)
    push_i32(&mut data, 1); // terminate
    assert_eq!(data.len(), 28);

    let mut sptr = Vec::new();
    direct_sptr_entry(&mut sptr, 1, 0, 8, 0);
    direct_sptr_entry(&mut sptr, 2, 4, 24, 1);
    push_chunk(&mut data, b"SPTR", &sptr);

    let mut func = Vec::new();
    func.extend_from_slice(&[1, 2, 1, 0]);
    push_i32(&mut func, 20);
    func.extend_from_slice(&[0, 0, 0, 0]);
    push_i32(&mut func, 0); // imported
    push_chunk(&mut data, b"FUNC", &func);

    data
}

#[test]
fn test_show_object_full_acse() {
    let buf = ObjectBuffer::new(build_full_acse()).unwrap();
    let layout = resolve_layout(&buf).unwrap();
    let out = dump::show_object(&buf, &layout).unwrap();
    assert_eq!(
        out,
        "-- SPTR (offset=28 size=24)\n\
         script=1 type=closed params=0 offset=8\n\
         00000008> pushnumber 42\n\
         00000016> terminate\n\
         script=2 type=enter params=1 offset=24\n\
         00000024> terminate\n\
         -- FUNC (offset=60 size=16)\n\
         index=0 params=1 size=2 has-return=1 offset=20\n\
         00000020> returnvoid\n\
         index=1 params=0 size=0 has-return=0 offset=0\n\
         (imported)\n"
    );
}

#[test]
fn test_list_chunks_headers_only() {
    let buf = ObjectBuffer::new(build_full_acse()).unwrap();
    let layout = resolve_layout(&buf).unwrap();
    let out = dump::list_chunks(&buf, &layout).unwrap();
    assert_eq!(
        out,
        "-- SPTR (offset=28 size=24)\n\
         -- FUNC (offset=60 size=16)\n"
    );
}

#[test]
fn test_view_chunk_matches_and_misses() {
    let buf = ObjectBuffer::new(build_full_acse()).unwrap();
    let layout = resolve_layout(&buf).unwrap();

    let out = dump::view_chunk(&buf, &layout, ChunkTag::Func)
        .unwrap()
        .unwrap();
    assert!(out.starts_with("-- FUNC (offset=60 size=16)\n"));
    assert!(out.contains("(imported)"));
    assert!(!out.contains("SPTR"));

    assert!(dump::view_chunk(&buf, &layout, ChunkTag::Alib)
        .unwrap()
        .is_none());
}

#[test]
fn test_script_offset_outside_file_warns_and_continues() {
    let mut data = b"ACSE".to_vec();
    push_i32(&mut data, 12);
    push_i32(&mut data, 1); // terminate at 8
    let mut sptr = Vec::new();
    direct_sptr_entry(&mut sptr, 1, 0, 4000, 0); // body out of range
    direct_sptr_entry(&mut sptr, 2, 0, 8, 0);
    push_chunk(&mut data, b"SPTR", &sptr);

    let buf = ObjectBuffer::new(data).unwrap();
    let layout = resolve_layout(&buf).unwrap();
    let out = dump::show_object(&buf, &layout).unwrap();
    assert_eq!(
        out,
        "-- SPTR (offset=12 size=24)\n\
         script=1 type=closed params=0 offset=4000\n\
         warning: code offset not inside object file\n\
         script=2 type=closed params=0 offset=8\n\
         00000008> terminate\n"
    );
}

#[test]
fn test_sflg_unknown_bits_annotated() {
    let mut data = b"ACSE".to_vec();
    push_i32(&mut data, 8);
    let mut sflg = Vec::new();
    push_i16(&mut sflg, 1);
    push_i16(&mut sflg, 0x3);
    push_i16(&mut sflg, 2);
    push_i16(&mut sflg, 0x6);
    push_chunk(&mut data, b"SFLG", &sflg);

    let buf = ObjectBuffer::new(data).unwrap();
    let layout = resolve_layout(&buf).unwrap();
    let out = dump::show_object(&buf, &layout).unwrap();
    assert_eq!(
        out,
        "-- SFLG (offset=8 size=8)\n\
         script=1 flags=net|clientside\n\
         script=2 flags=clientside|unknown(0x4)\n"
    );
}

#[test]
fn test_unknown_chunk_reported_by_name_only() {
    let mut data = b"ACSE".to_vec();
    push_i32(&mut data, 8);
    push_chunk(&mut data, b"XYZW", &[1, 2, 3]);
    let buf = ObjectBuffer::new(data).unwrap();
    let layout = resolve_layout(&buf).unwrap();
    let out = dump::show_object(&buf, &layout).unwrap();
    assert_eq!(
        out,
        "-- XYZW (offset=8 size=3)\n\
         chunk not supported\n"
    );
}

#[test]
fn test_atag_unsupported_version_continues() {
    let mut data = b"ACSE".to_vec();
    push_i32(&mut data, 8);
    push_chunk(&mut data, b"ATAG", &[2, 0, 0, 0, 0]);
    push_chunk(&mut data, b"ALIB", b"");
    let buf = ObjectBuffer::new(data).unwrap();
    let layout = resolve_layout(&buf).unwrap();
    let out = dump::show_object(&buf, &layout).unwrap();
    assert_eq!(
        out,
        "-- ATAG (offset=8 size=5)\n\
         chunk-version=2\n\
         this version not supported\n\
         -- ALIB (offset=21 size=0)\n\
         library=yes\n"
    );
}

// Indirect ACSe file: the disguised directories drive the ACS0 dump
// path while the chunks use the compact script entries.
#[test]
fn test_indirect_full_dump() {
    // 0: fake header -> directory at 36
    // 8: script code: pushbyte 5; suspend; terminate (compact)
    // 12: SPTR chunk with one compact entry  [12, 28)
    // 28: real header (chunk offset 12, then "ACSe")
    // 36: script directory, 52: string directory
    let mut data = b"ACS\0".to_vec();
    push_i32(&mut data, 36);
    data.extend_from_slice(&[167, 5, 2, 1]); // code at 8

    let mut sptr = Vec::new();
    push_i16(&mut sptr, 9);
    sptr.push(0); // type
    sptr.push(0); // params
    push_i32(&mut sptr, 8);
    push_chunk(&mut data, b"SPTR", &sptr);
    assert_eq!(data.len(), 28);

    push_i32(&mut data, 12);
    data.extend_from_slice(b"ACSe");

    push_i32(&mut data, 1); // total scripts
    push_i32(&mut data, 2008); // respawn script 8
    push_i32(&mut data, 8);
    push_i32(&mut data, 0);
    push_i32(&mut data, 1); // total strings
    push_i32(&mut data, 60);
    data.extend_from_slice(b"hey\0");
    assert_eq!(data.len(), 64);

    let buf = ObjectBuffer::new(data).unwrap();
    let layout = resolve_layout(&buf).unwrap();
    assert!(layout.indirect);
    assert!(layout.small_code);

    let out = dump::show_object(&buf, &layout).unwrap();
    assert_eq!(
        out,
        "-- SPTR (offset=12 size=8)\n\
         script=9 type=closed params=0 offset=8\n\
         00000008> pushbyte 5\n\
         00000010> suspend\n\
         00000011> terminate\n\
         == script directory (offset=36)\n\
         total-scripts=1\n\
         script=8 type=respawn params=0 offset=8\n\
         00000008> pushbyte 5\n\
         00000010> suspend\n\
         00000011> terminate\n\
         == string directory (offset=52)\n\
         total-strings=1\n\
         [0] offset=60 \"hey\"\n"
    );
}
