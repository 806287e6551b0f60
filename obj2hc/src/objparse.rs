// only the parts of an obj that can end up in a header get read here:
// positions, edges, triangles and `o` groups
// normals, texcoords, materials, smoothing groups etc are skipped like comments
// there's no attempt at validating the file beyond what we need to resolve indices

use crate::config::Mode;
use crate::error::{Error, Result};

// the header stores CD3I32s so positions get snapped to whole units on the way in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

// both index types are 0-based; the file's 1-based indices are shifted on parse
pub type Edge = [usize; 2];
pub type Triangle = [usize; 3];

/// A named `o` group, only built in [`Mode::Obj`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    /// 0-based line index of the `o` marker
    pub start: usize,
    /// exclusive; either the next marker or the end of the file
    pub end: usize,
    pub vertices: Vec<Vertex>,
    // NOTE: these are stored as written, i.e. relative to the whole file and
    // not to `vertices`. the emitter only uses their count
    pub edges: Vec<Edge>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ObjModel {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub triangles: Vec<Triangle>,
    pub parts: Vec<Part>,
}

enum Record {
    Vertex(Vertex),
    Edge(Edge),
    Triangle(Triangle),
}

/// Scans the whole file once for global records, and a second time per `o`
/// group when `mode` is [`Mode::Obj`].
pub fn parse(lines: &[String], mode: Mode) -> Result<ObjModel> {
    let mut model = ObjModel::default();
    for (i, line) in lines.iter().enumerate() {
        match record(line, i + 1)? {
            Some(Record::Vertex(v)) => model.vertices.push(v),
            Some(Record::Edge(e)) => model.edges.push(e),
            Some(Record::Triangle(t)) => model.triangles.push(t),
            None => {}
        }
    }
    if mode == Mode::Obj {
        model.parts = parts(lines)?;
    }
    Ok(model)
}

fn parts(lines: &[String]) -> Result<Vec<Part>> {
    let markers = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| line.strip_prefix("o ").map(|name| (i, name.trim())))
        .collect::<Vec<_>>();

    let mut parts = Vec::with_capacity(markers.len());
    for (n, &(start, name)) in markers.iter().enumerate() {
        let end = markers.get(n + 1).map_or(lines.len(), |&(next, _)| next);
        let mut part = Part {
            name: name.to_string(),
            start,
            end,
            vertices: vec![],
            edges: vec![],
        };
        // faces inside a group are dropped, obj mode only bakes edges
        for (i, line) in lines.iter().enumerate().take(end).skip(start + 1) {
            match record(line, i + 1)? {
                Some(Record::Vertex(v)) => part.vertices.push(v),
                Some(Record::Edge(e)) => part.edges.push(e),
                _ => {}
            }
        }
        log::debug!(
            "part {} `{}` spans lines {}..{}: {} vertices, {} edges",
            n,
            part.name,
            start + 1,
            end,
            part.vertices.len(),
            part.edges.len()
        );
        parts.push(part);
    }
    Ok(parts)
}

// `lineno` is 1-based and only used for diagnostics
fn record(line: &str, lineno: usize) -> Result<Option<Record>> {
    let (tag, rest) = match (line.get(..2), line.get(2..)) {
        (Some(tag), Some(rest)) => (tag, rest),
        _ => return Ok(None),
    };
    Ok(match tag {
        "v " => {
            let [x, y, z] = tokens(rest, lineno, "vertex")?;
            Some(Record::Vertex(Vertex {
                x: coordinate(x, lineno)?,
                y: coordinate(y, lineno)?,
                z: coordinate(z, lineno)?,
            }))
        }
        "l " => Some(Record::Edge(indices(rest, lineno, "line")?)),
        "f " => Some(Record::Triangle(indices(rest, lineno, "face")?)),
        _ => None,
    })
}

fn tokens<'a, const N: usize>(rest: &'a str, lineno: usize, what: &str) -> Result<[&'a str; N]> {
    let found = rest.split_whitespace().collect::<Vec<_>>();
    found.as_slice().try_into().map_err(|_| {
        Error::parse(
            lineno,
            format!("{what} needs exactly {N} values, found {}", found.len()),
        )
    })
}

fn indices<const N: usize>(rest: &str, lineno: usize, what: &str) -> Result<[usize; N]> {
    let mut out = [0; N];
    for (slot, token) in out.iter_mut().zip(tokens::<N>(rest, lineno, what)?) {
        *slot = index(token, lineno)?;
    }
    Ok(out)
}

fn index(token: &str, lineno: usize) -> Result<usize> {
    match token.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(Error::parse(
            lineno,
            format!("`{token}` is not a positive vertex index"),
        )),
    }
}

// ties go to the even neighbour, same everywhere in the file
fn coordinate(token: &str, lineno: usize) -> Result<i32> {
    let value = token
        .parse::<f64>()
        .map_err(|_| Error::parse(lineno, format!("`{token}` is not a number")))?;
    let rounded = value.round_ties_even();
    if !rounded.is_finite() || rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
        return Err(Error::parse(
            lineno,
            format!("`{token}` doesn't fit in a 32-bit coordinate"),
        ));
    }
    Ok(rounded as i32)
}
