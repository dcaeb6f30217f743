//! Object dump rendering and dispatch
//!
//! The three top-level operations over a resolved file: dump everything,
//! list chunk headers, or dump the chunks matching one tag. Rendering
//! follows the traversal order of the file: chunks front to back, then
//! the script directory, then the string directory.

use acsdump_disassembler::disassemble;
use acsdump_object::chunks::{
    read_aimp, read_aini, read_aray, read_atag, read_func, read_load, read_local_arrays,
    read_mimp, read_mini, read_name_table, read_sflg, read_snam, read_sptr, read_string_table,
    read_svct, read_tagged_indices, ArrayTagging, ATAG_FUNCTION, ATAG_INTEGER, ATAG_STRING,
};
use acsdump_object::directory::{read_script_directory, read_string_directory};
use acsdump_object::{calc_code_size, ChunkSlice, ChunkWalker, ObjectBuffer};
use acsdump_spec::script::{SCRIPT_FLAG_CLIENTSIDE, SCRIPT_FLAG_NET};
use acsdump_spec::{script_type_name, Chunk, ChunkTag, ObjectLayout, Result};
use log::warn;

/// Dump every chunk with contents, then the directories when present.
pub fn show_object(buf: &ObjectBuffer, layout: &ObjectLayout) -> Result<String> {
    let mut out = String::new();
    if layout.format.is_chunked() {
        let mut walker = ChunkWalker::new(buf, layout);
        while let Some(chunk) = walker.next_chunk()? {
            show_chunk(&mut out, buf, layout, &chunk, true)?;
        }
    }
    if layout.has_directory() {
        show_script_directory(&mut out, buf, layout)?;
        show_string_directory(&mut out, buf, layout)?;
    }
    Ok(out)
}

/// One header line per chunk, no contents.
pub fn list_chunks(buf: &ObjectBuffer, layout: &ObjectLayout) -> Result<String> {
    let mut out = String::new();
    let mut walker = ChunkWalker::new(buf, layout);
    while let Some(chunk) = walker.next_chunk()? {
        show_chunk(&mut out, buf, layout, &chunk, false)?;
    }
    Ok(out)
}

/// Dump every chunk whose tag matches; `None` when nothing matched.
pub fn view_chunk(
    buf: &ObjectBuffer,
    layout: &ObjectLayout,
    tag: ChunkTag,
) -> Result<Option<String>> {
    let mut out = String::new();
    let mut found = false;
    let mut walker = ChunkWalker::new(buf, layout);
    while let Some(chunk) = walker.next_chunk()? {
        if chunk.tag == tag {
            show_chunk(&mut out, buf, layout, &chunk, true)?;
            found = true;
        }
    }
    Ok(found.then_some(out))
}

/// Tag for a user-supplied chunk name; `None` when the name is not four
/// characters or not recognized.
pub fn requested_tag(name: &str) -> Option<ChunkTag> {
    let bytes = name.as_bytes();
    if bytes.len() != 4 {
        return None;
    }
    let name = [bytes[0], bytes[1], bytes[2], bytes[3]];
    match ChunkTag::from_name(&name) {
        ChunkTag::Unknown => None,
        tag => Some(tag),
    }
}

fn show_chunk(
    out: &mut String,
    buf: &ObjectBuffer,
    layout: &ObjectLayout,
    chunk: &Chunk,
    show_contents: bool,
) -> Result<()> {
    out.push_str(&format!(
        "-- {} (offset={} size={})\n",
        chunk.name_str(),
        chunk.header_offset(),
        chunk.size
    ));
    if !show_contents {
        return Ok(());
    }
    let slice = ChunkSlice::new(buf, chunk);
    match chunk.tag {
        ChunkTag::Aray => {
            for decl in read_aray(&slice)? {
                out.push_str(&format!("index={} size={}\n", decl.number, decl.size));
            }
        }
        ChunkTag::Aini => {
            let init = read_aini(&slice)?;
            out.push_str(&format!("index={}\n", init.index));
            for (k, value) in init.values.iter().enumerate() {
                out.push_str(&format!("[{k}] = {value}\n"));
            }
        }
        ChunkTag::Aimp => {
            let imports = read_aimp(&slice)?;
            out.push_str(&format!("total-imported={}\n", imports.len()));
            for import in imports {
                out.push_str(&format!(
                    "index={} {}[{}]\n",
                    import.index,
                    text(&import.name),
                    import.size
                ));
            }
        }
        ChunkTag::Astr | ChunkTag::Mstr => {
            for index in read_tagged_indices(&slice)? {
                out.push_str(&format!("tagged={index}\n"));
            }
        }
        ChunkTag::Atag => show_atag(out, &slice)?,
        ChunkTag::Load => {
            for name in read_load(&slice)? {
                out.push_str(&format!("imported-module={}\n", text(&name)));
            }
        }
        ChunkTag::Func => {
            for (index, entry) in read_func(&slice)?.iter().enumerate() {
                out.push_str(&format!(
                    "index={index} params={} size={} has-return={} offset={}\n",
                    entry.num_param, entry.size, entry.has_return, entry.offset
                ));
                if entry.is_imported() {
                    out.push_str("(imported)\n");
                } else {
                    show_code(out, buf, layout, entry.offset)?;
                }
            }
        }
        ChunkTag::Fnam => {
            let entries = read_name_table(&slice)?;
            out.push_str(&format!("table-size={}\n", entries.len()));
            for (index, entry) in entries.iter().enumerate() {
                out.push_str(&format!("[{index}] {}\n", text(&entry.name)));
            }
        }
        ChunkTag::Mini => {
            let init = read_mini(&slice)?;
            out.push_str(&format!("first-var={}\n", init.first_var));
            for (k, value) in init.values.iter().enumerate() {
                out.push_str(&format!(
                    "index={} value={value}\n",
                    init.first_var + k as i32
                ));
            }
        }
        ChunkTag::Mimp => {
            for import in read_mimp(&slice)? {
                out.push_str(&format!(
                    "index={} name={}\n",
                    import.index,
                    text(&import.name)
                ));
            }
        }
        ChunkTag::Mexp => {
            let entries = read_name_table(&slice)?;
            out.push_str(&format!("table-size={}\n", entries.len()));
            for (index, entry) in entries.iter().enumerate() {
                out.push_str(&format!(
                    "[{index}] offset={} {}\n",
                    entry.offset,
                    text(&entry.name)
                ));
            }
        }
        ChunkTag::Sptr => {
            for entry in read_sptr(&slice, layout.indirect)? {
                out.push_str(&format!(
                    "script={} type={} params={} offset={}\n",
                    entry.number,
                    type_text(entry.stype),
                    entry.num_param,
                    entry.offset
                ));
                show_code(out, buf, layout, entry.offset)?;
            }
        }
        ChunkTag::Sflg => {
            for entry in read_sflg(&slice)? {
                out.push_str(&format!(
                    "script={} flags={}\n",
                    entry.number,
                    flags_text(entry.flags)
                ));
            }
        }
        ChunkTag::Svct => {
            for entry in read_svct(&slice)? {
                out.push_str(&format!(
                    "script={} new-size={}\n",
                    entry.number, entry.new_size
                ));
            }
        }
        ChunkTag::Snam => {
            let names = read_snam(&slice)?;
            out.push_str(&format!("total-named-scripts={}\n", names.len()));
            for (index, name) in names.iter().enumerate() {
                // Named scripts count down from -1 in table order.
                out.push_str(&format!(
                    "script-number={} script-name=\"{}\"\n",
                    -1 - index as i32,
                    text(name)
                ));
            }
        }
        ChunkTag::Strl => show_string_table(out, &slice, false)?,
        ChunkTag::Stre => show_string_table(out, &slice, true)?,
        ChunkTag::Sary | ChunkTag::Fary => {
            let owner_kind = if chunk.tag == ChunkTag::Fary {
                "function"
            } else {
                "script"
            };
            let arrays = read_local_arrays(&slice)?;
            out.push_str(&format!(
                "{owner_kind}={} total-script-arrays={}\n",
                arrays.owner,
                arrays.sizes.len()
            ));
            for (index, size) in arrays.sizes.iter().enumerate() {
                out.push_str(&format!("array-index={index} array-size={size}\n"));
            }
        }
        ChunkTag::Alib => out.push_str("library=yes\n"),
        ChunkTag::Unknown => out.push_str("chunk not supported\n"),
    }
    Ok(())
}

fn show_atag(out: &mut String, slice: &ChunkSlice) -> Result<()> {
    match read_atag(slice)? {
        ArrayTagging::Version0 { array_index, tags } => {
            out.push_str(&format!(
                "chunk-version=0 tagged-array={array_index} total-tagged-elements={}\n",
                tags.len()
            ));
            for (index, tag) in tags.iter().enumerate() {
                let label = match *tag {
                    ATAG_INTEGER => "integer".to_string(),
                    ATAG_STRING => "string".to_string(),
                    ATAG_FUNCTION => "function".to_string(),
                    other => format!("unknown (tag-type={other})"),
                };
                out.push_str(&format!("[{index}] {label}\n"));
            }
        }
        ArrayTagging::Unsupported { version } => {
            out.push_str(&format!("chunk-version={version}\n"));
            out.push_str("this version not supported\n");
        }
    }
    Ok(())
}

fn show_string_table(out: &mut String, slice: &ChunkSlice, encoded: bool) -> Result<()> {
    let entries = read_string_table(slice, encoded)?;
    out.push_str(&format!("table-size={}\n", entries.len()));
    for (index, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "[{index}] offset={} \"{}\"\n",
            entry.offset,
            escape(&entry.value)
        ));
    }
    Ok(())
}

fn show_script_directory(out: &mut String, buf: &ObjectBuffer, layout: &ObjectLayout) -> Result<()> {
    out.push_str(&format!(
        "== script directory (offset={})\n",
        layout.directory_offset
    ));
    let entries = read_script_directory(buf, layout)?;
    out.push_str(&format!("total-scripts={}\n", entries.len()));
    for entry in entries {
        out.push_str(&format!(
            "script={} type={} params={} offset={}\n",
            entry.user_number(),
            type_text(entry.stype()),
            entry.num_param,
            entry.offset
        ));
        show_code(out, buf, layout, entry.offset)?;
    }
    Ok(())
}

fn show_string_directory(out: &mut String, buf: &ObjectBuffer, layout: &ObjectLayout) -> Result<()> {
    out.push_str(&format!(
        "== string directory (offset={})\n",
        layout.string_offset
    ));
    let offsets = read_string_directory(buf, layout)?;
    out.push_str(&format!("total-strings={}\n", offsets.len()));
    for (index, offset) in offsets.iter().enumerate() {
        let value = buf.cstr_at(buf.require_offset(*offset as i64)?)?;
        out.push_str(&format!("[{index}] offset={offset} \"{}\"\n", escape(value)));
    }
    Ok(())
}

/// Disassemble one script or function body. An entry pointing outside
/// the file is reported and skipped; remaining entries still print.
fn show_code(out: &mut String, buf: &ObjectBuffer, layout: &ObjectLayout, offset: i32) -> Result<()> {
    if !buf.offset_in_file(offset as i64) {
        warn!("code offset {offset} not inside object file, skipping body");
        out.push_str("warning: code offset not inside object file\n");
        return Ok(());
    }
    let offset = offset as u32;
    let size = calc_code_size(buf, layout, offset)?;
    out.push_str(&disassemble(buf.bytes(), offset, size, layout.small_code)?);
    Ok(())
}

fn type_text(stype: i32) -> String {
    match script_type_name(stype) {
        Some(name) => name.to_string(),
        None => format!("unknown:{stype}"),
    }
}

fn flags_text(flags: u16) -> String {
    let mut parts = Vec::new();
    if flags & SCRIPT_FLAG_NET != 0 {
        parts.push("net".to_string());
    }
    if flags & SCRIPT_FLAG_CLIENTSIDE != 0 {
        parts.push("clientside".to_string());
    }
    let unknown = flags & !(SCRIPT_FLAG_NET | SCRIPT_FLAG_CLIENTSIDE);
    if unknown != 0 {
        parts.push(format!("unknown(0x{unknown:x})"));
    }
    parts.join("|")
}

fn text(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| byte as char).collect()
}

// Quotes and line breaks are escaped; everything else passes through as
// the raw byte.
fn escape(bytes: &[u8]) -> String {
    let mut out = String::new();
    for &byte in bytes {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\r' => out.push_str("\\r"),
            b'\n' => out.push_str("\\n"),
            other => out.push(other as char),
        }
    }
    out
}
