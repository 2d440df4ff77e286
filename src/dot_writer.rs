use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::Command;

use crate::graph::DeBruijnGraph;

/// Write the graph in Graphviz DOT format: one node per distinct
/// adjacency key, one directed edge per multimap entry, so parallel
/// edges show up as parallel arrows.
pub fn write_dot(graph: &DeBruijnGraph, output_path: &str, verbose: bool) -> std::io::Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "digraph debruijn {{")?;
    for node in graph.nodes() {
        writeln!(writer, "    \"{}\";", escape(node))?;
    }
    for (src, dst) in graph.edges() {
        writeln!(writer, "    \"{}\" -> \"{}\";", escape(src), escape(dst))?;
    }
    writeln!(writer, "}}")?;
    writer.flush()?;

    if verbose {
        eprintln!(
            "[dot] wrote {} nodes and {} edges to {}",
            graph.node_count(),
            graph.edge_count(),
            output_path
        );
    }
    Ok(())
}

/// Render a previously written DOT file to PNG by delegating to the
/// external `dot` tool, then hand the image to the platform viewer.
/// Returns the PNG path. A missing viewer is not an error; a missing or
/// failing `dot` is.
pub fn render_png(dot_path: &str, verbose: bool) -> Result<String, String> {
    let png_path = format!("{}.png", dot_path.trim_end_matches(".dot"));

    let status = Command::new("dot")
        .arg("-Tpng")
        .arg(dot_path)
        .arg("-o")
        .arg(&png_path)
        .status()
        .map_err(|e| format!("failed to run graphviz 'dot': {}", e))?;
    if !status.success() {
        return Err(format!("graphviz 'dot' exited with {}", status));
    }
    if verbose {
        eprintln!("[dot] rendered {}", png_path);
    }

    let viewer = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    if let Err(e) = Command::new(viewer).arg(&png_path).spawn() {
        if verbose {
            eprintln!("[dot] could not open viewer '{}': {}", viewer, e);
        }
    }

    Ok(png_path)
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
