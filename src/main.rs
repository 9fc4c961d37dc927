// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Netsheet CLI entrypoint.
//!
//! Compiles a topology description into one SVG per sheet. Layouts come from
//! an optional sidecar file keyed by sheet id; sheets without an entry render
//! with fixed default placement.

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use netsheet::model::{Graph, GraphDoc, LayoutResult, Severity, SheetId};
use netsheet::partition::{partition, LayoutError, LayoutOracle};
use netsheet::render::{document_to_svg, render_sheet};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <graph.json> [--layouts <layouts.json>] [--out <dir>]\n  {program} <graph.json> --list\n\nCompiles the graph into one SVG per sheet (the root sheet plus one per\ngrouping), written to --out (default: current directory).\n\n--layouts points at a JSON object mapping sheet ids to layout results from\nan external layout engine; sheets without an entry use default placement.\n--list prints the sheet ids without writing any files."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    graph: Option<String>,
    layouts: Option<String>,
    out: Option<String>,
    list: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--layouts" => {
                if options.layouts.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.layouts = Some(path);
            }
            "--out" => {
                if options.out.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.out = Some(path);
            }
            "--list" => {
                if options.list {
                    return Err(());
                }
                options.list = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.graph.is_some() {
                    return Err(());
                }
                options.graph = Some(arg);
            }
        }
    }

    if options.graph.is_none() {
        return Err(());
    }

    if options.list && options.out.is_some() {
        return Err(());
    }

    Ok(options)
}

/// Oracle backed by the sidecar layouts file. Unknown sheets get an empty
/// layout; the renderer falls back to default placement.
struct FileLayouts {
    layouts: BTreeMap<SheetId, LayoutResult>,
}

impl LayoutOracle for FileLayouts {
    fn layout(
        &self,
        sheet_id: &SheetId,
        _graph: &Graph,
    ) -> Result<LayoutResult, LayoutError> {
        Ok(self.layouts.get(sheet_id).cloned().unwrap_or_default())
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "netsheet".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let graph_path = options.graph.expect("validated by parse_options");
        let raw = fs::read_to_string(&graph_path)?;
        let doc: GraphDoc = serde_json::from_str(&raw)?;
        let (graph, issues) = Graph::from_doc(doc);
        for issue in &issues {
            match issue.severity() {
                Severity::Warning => eprintln!("netsheet: warning: {issue}"),
                Severity::Error => eprintln!("netsheet: error: {issue}"),
            }
        }

        let layouts = match &options.layouts {
            Some(path) => {
                let raw = fs::read_to_string(path)?;
                serde_json::from_str(&raw)?
            }
            None => BTreeMap::new(),
        };
        let root_layout = layouts
            .get(&netsheet::partition::root_sheet_id())
            .cloned()
            .unwrap_or_default();
        let oracle = FileLayouts { layouts };

        let (sheets, warnings) = partition(&graph, root_layout, &oracle);
        for warning in &warnings {
            eprintln!("netsheet: warning: {warning}");
        }

        if options.list {
            for sheet_id in sheets.keys() {
                println!("{sheet_id}");
            }
            return Ok(());
        }

        let out_dir = options.out.unwrap_or_else(|| ".".to_owned());
        fs::create_dir_all(&out_dir)?;
        for (sheet_id, sheet) in &sheets {
            let svg = document_to_svg(&render_sheet(sheet));
            let path = Path::new(&out_dir).join(format!("{sheet_id}.svg"));
            fs::write(path, svg)?;
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("netsheet: {err}");
        std::process::exit(1);
    }
}
