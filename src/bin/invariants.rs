//! Binary that takes as standard in a graph in DIMACS `.col` format, computes
//! the invariant named by the first argument (or all of them) and writes the
//! results to standard out.

use std::env;
use std::error;
use std::io;
use std::io::Write;

use hue_and_cut::cust_error::QueryError;
use hue_and_cut::graph::UGraph;
use hue_and_cut::query_instance::QueryInstance;

fn write_chromatic<W: Write>(instance: &mut QueryInstance, mut out: W) -> Result<(), Box<dyn error::Error>> {
    let chi = instance.chromatic_number()?;
    if chi > 0 {
        let coloring = instance.vertex_coloring(chi)?
            .ok_or_else(|| QueryError::InvalidSolution("no witness at the chromatic number".to_owned()))?;
        if !instance.graph().is_proper_coloring(&coloring) {
            return Err(Box::new(QueryError::InvalidSolution("witness coloring is not proper".to_owned())));
        }
    }
    writeln!(out, "chromatic number: {}", chi)?;
    Ok(())
}

fn write_edge_chromatic<W: Write>(instance: &mut QueryInstance, mut out: W) -> Result<(), Box<dyn error::Error>> {
    writeln!(out, "edge chromatic number: {}", instance.edge_chromatic_number()?)?;
    Ok(())
}

fn write_min_cut<W: Write>(instance: &mut QueryInstance, mut out: W) -> Result<(), Box<dyn error::Error>> {
    let cut = instance.min_edge_cut()?;
    if !cut.is_empty() && !instance.graph().disconnects(&cut) {
        return Err(Box::new(QueryError::InvalidSolution("cut does not separate the graph".to_owned())));
    }
    writeln!(out, "minimum edge cut ({} edges):", cut.len())?;
    for (src, trg) in cut {
        writeln!(out, "{} {}", src + 1, trg + 1)?;
    }
    Ok(())
}

fn write_connectivity<W: Write>(instance: &mut QueryInstance, mut out: W) -> Result<(), Box<dyn error::Error>> {
    writeln!(out, "edge connectivity: {}", instance.edge_connectivity()?)?;
    Ok(())
}

pub fn main() -> Result<(), Box<dyn error::Error>> {
    env_logger::init();
    let stdin = io::stdin();
    let stdin = stdin.lock();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let graph = UGraph::read_col(stdin)?;
    let mut instance = QueryInstance::new(graph);
    let which = env::args().nth(1).unwrap_or_else(|| "all".to_owned());
    match which.as_str() {
        "chromatic" => write_chromatic(&mut instance, &mut stdout)?,
        "edge-chromatic" => write_edge_chromatic(&mut instance, &mut stdout)?,
        "min-cut" => write_min_cut(&mut instance, &mut stdout)?,
        "connectivity" => write_connectivity(&mut instance, &mut stdout)?,
        "all" => {
            write_chromatic(&mut instance, &mut stdout)?;
            write_edge_chromatic(&mut instance, &mut stdout)?;
            write_min_cut(&mut instance, &mut stdout)?;
            write_connectivity(&mut instance, &mut stdout)?;
        },
        _ => {
            return Err(Box::new(QueryError::InvalidParameter(
                format!("unknown invariant `{}`, expected chromatic, edge-chromatic, min-cut, connectivity or all", which),
            )));
        },
    }
    Ok(())
}
