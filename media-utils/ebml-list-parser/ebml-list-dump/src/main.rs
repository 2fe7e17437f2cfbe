// Copyright 2022-2023 Andrew D. Straw.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT
// or http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::io::Read;

use clap::Parser;

use ebml_list_parser::{ids, IdFmt, ListClient, ListParser, Result};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sets input file name
    input_fname: std::path::PathBuf,

    /// Number of bytes read from the file at a time
    #[arg(long, default_value_t = 4096)]
    chunk_size: usize,

    /// Maximum number of bytes of binary elements to print
    #[arg(long, default_value_t = 16)]
    max_binary: usize,
}

/// Prints every element it is given as one line of an indented tree.
struct TreePrinter {
    depth: usize,
    max_binary: usize,
}

impl TreePrinter {
    fn new(max_binary: usize) -> Self {
        Self {
            depth: 0,
            max_binary,
        }
    }

    fn print(&self, id: u32, value: std::fmt::Arguments) {
        println!("{:indent$}{}: {value}", "", IdFmt(id), indent = 2 * self.depth);
    }
}

impl ListClient for TreePrinter {
    fn on_list_start(&mut self, id: u32) -> Result<()> {
        println!("{:indent$}{}", "", IdFmt(id), indent = 2 * self.depth);
        self.depth += 1;
        Ok(())
    }

    fn child_client(&mut self, _id: u32) -> Option<&mut dyn ListClient> {
        Some(self)
    }

    fn on_list_end(&mut self, _id: u32) -> Result<()> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn on_uint(&mut self, id: u32, val: i64) -> Result<()> {
        self.print(id, format_args!("{val}"));
        Ok(())
    }

    fn on_float(&mut self, id: u32, val: f64) -> Result<()> {
        self.print(id, format_args!("{val}"));
        Ok(())
    }

    fn on_binary(&mut self, id: u32, data: &[u8]) -> Result<()> {
        if id == ids::DATE_UTC {
            let date = ebml_list_parser::decode_date(data)?;
            self.print(
                id,
                format_args!("{}", date.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
            );
            return Ok(());
        }
        let mut hex = String::new();
        for byte in data.iter().take(self.max_binary) {
            hex.push_str(&format!("{byte:02X} "));
        }
        if data.len() > self.max_binary {
            hex.push_str("..");
        }
        self.print(id, format_args!("[{} bytes] {}", data.len(), hex.trim_end()));
        Ok(())
    }

    fn on_string(&mut self, id: u32, val: &str) -> Result<()> {
        self.print(id, format_args!("{val:?}"));
        Ok(())
    }
}

fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!cfg!(windows))
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(tracing_subscriber::filter::EnvFilter::from_default_env())
        .try_init()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let mut fd = std::fs::File::open(&cli.input_fname)?;
    let mut chunk = vec![0u8; cli.chunk_size.max(1)];
    let mut pending: Vec<u8> = Vec::new();
    let mut parser: Option<ListParser<TreePrinter>> = None;
    let mut file_offset = 0u64;
    let mut eof = false;

    loop {
        // Each top-level element gets a parser of its own.
        if parser.is_none() {
            if let Some(header) = ebml_list_parser::parse_element_header(&pending)? {
                if header.id != ids::EBML_HEADER && header.id != ids::SEGMENT {
                    anyhow::bail!(
                        "unexpected top-level element {} at offset {file_offset}",
                        IdFmt(header.id)
                    );
                }
                tracing::debug!("{} at offset {file_offset}", IdFmt(header.id));
                parser = Some(ListParser::new(header.id, TreePrinter::new(cli.max_binary))?);
            }
        }

        if let Some(p) = parser.as_mut() {
            let used = p
                .parse(&pending)
                .map_err(|e| anyhow::anyhow!("at offset {file_offset}: {e}"))?;
            pending.drain(..used);
            file_offset += used as u64;
            if p.is_parsing_complete() {
                parser = None;
                continue;
            }
        }

        if eof {
            break;
        }
        let n_read = fd.read(&mut chunk)?;
        eof = n_read == 0;
        pending.extend_from_slice(&chunk[..n_read]);
    }

    if let Some(p) = &parser {
        // Normal for a live stream ending in an unknown-size segment.
        for list in p.open_lists() {
            tracing::info!(
                "{} still open at end of file ({} of {} bytes)",
                IdFmt(list.id),
                list.bytes_parsed,
                list.size
            );
        }
    }
    if !pending.is_empty() {
        tracing::warn!("{} trailing bytes not parsed", pending.len());
    }
    println!("{file_offset} bytes parsed");
    Ok(())
}
