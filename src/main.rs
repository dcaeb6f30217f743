//! acsdump: objdump-style inspector for ACS object files.

mod args;

use std::fs;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

use acsdump::dump;
use acsdump_object::{resolve_layout, ObjectBuffer};
use acsdump_spec::ObjectError;
use args::Args;

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let data = fs::read(&args.file)
        .with_context(|| format!("failed to open file: {}", args.file.display()))?;
    let buf = ObjectBuffer::new(data)?;

    let layout = match resolve_layout(&buf) {
        Err(ObjectError::UnsupportedFormat) => {
            println!("format: unknown");
            return Err(ObjectError::UnsupportedFormat.into());
        }
        other => other?,
    };
    let indirect = if layout.indirect { " (indirect)" } else { "" };
    println!("format: {}{}", layout.format.name(), indirect);

    if args.list_chunks {
        require_chunked(&layout)?;
        print!("{}", dump::list_chunks(&buf, &layout)?);
    } else if let Some(name) = &args.view_chunk {
        require_chunked(&layout)?;
        let tag = dump::requested_tag(name)
            .ok_or_else(|| anyhow::anyhow!("unsupported chunk: {name}"))?;
        match dump::view_chunk(&buf, &layout, tag)? {
            Some(text) => print!("{text}"),
            None => anyhow::bail!("`{name}` chunk not found"),
        }
    } else {
        print!("{}", dump::show_object(&buf, &layout)?);
    }
    Ok(())
}

fn require_chunked(layout: &acsdump_spec::ObjectLayout) -> Result<(), ObjectError> {
    if layout.format.is_chunked() {
        Ok(())
    } else {
        Err(ObjectError::UnsupportedOperation(
            "format does not support chunks",
        ))
    }
}
