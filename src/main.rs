// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galatea CLI entrypoint.
//!
//! By default this runs the interactive TUI, optionally opening a saved
//! sketch file. Use `--generate <text>` to build a diagram from a plain
//! description without entering the TUI: the result is printed as Unicode
//! text and, when a sketch file is given, saved to it.

use std::error::Error;
use std::path::PathBuf;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<sketch-file>]\n  {program} [<sketch-file>] --generate <text>\n\nWithout flags the interactive TUI starts; the optional sketch file is\nopened on launch and used as the save target.\n\n--generate builds a diagram from a free-text description, prints it, and\nsaves it to the sketch file when one is given."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    sketch_file: Option<String>,
    generate: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--generate" => {
                if options.generate.is_some() {
                    return Err(());
                }
                let text = args.next().ok_or(())?;
                options.generate = Some(text);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.sketch_file.is_some() {
                    return Err(());
                }
                options.sketch_file = Some(arg);
            }
        }
    }

    Ok(options)
}

fn run_generate(options: &CliOptions, text: &str) -> Result<(), Box<dyn Error>> {
    let mut sketch = galatea::model::Sketch::new();
    let report = galatea::generate::build_from_description(sketch.graph_mut(), text)?;
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    let selection = galatea::ops::Selection::default();
    let camera = galatea::editor::Camera::default();
    let view = galatea::render::SceneView {
        sketch: &sketch,
        selection: &selection,
        camera: &camera,
        pending_source: None,
        box_selection: None,
        selection_frame: None,
        active_stroke: None,
    };
    let canvas = galatea::render::render_scene(&view, 100, 24);
    println!("{canvas}");
    println!(
        "{} node(s), {} connection(s)",
        report.nodes_added, report.edges_added
    );

    if let Some(path) = &options.sketch_file {
        galatea::store::save_sketch(std::path::Path::new(path), &sketch)?;
        eprintln!("saved {path}");
    }
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "galatea".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if let Some(text) = options.generate.clone() {
            return run_generate(&options, &text);
        }

        let path = options.sketch_file.map(PathBuf::from);
        galatea::tui::run(path)
    })();

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
