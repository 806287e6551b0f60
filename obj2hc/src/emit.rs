// turns a parsed model into a HolyC header
// every coordinate is written out as a field assignment so the header needs no
// initializer-list support, just a CD3I32 type in scope

use crate::config::Mode;
use crate::error::{Error, Result};
use crate::objparse::{Edge, ObjModel, Vertex};

/// Builds the full header text for `model`, guard included.
///
/// Nothing is written to disk here, so a bad index leaves no partial output.
pub fn emit(model: &ObjModel, mode: Mode, name: &str) -> Result<String> {
    let mut out = format!("#ifndef {name}_HC\n#define {name}_HC\n\n");
    match mode {
        Mode::Line => lines(&mut out, model, name)?,
        Mode::Face => faces(&mut out, model, name)?,
        Mode::Obj => parts(&mut out, model, name)?,
    }
    out.push_str("\n#endif\n");
    Ok(out)
}

fn lines(out: &mut String, model: &ObjModel, name: &str) -> Result<()> {
    out.push_str(&format!(
        "#define {name}_cnt {}\nCD3I32 {name}[{name}_cnt];\n",
        model.edges.len() * 2
    ));
    for (li, edge) in model.edges.iter().enumerate() {
        edge_entries(out, name, li, edge, &model.vertices, "line")?;
    }
    Ok(())
}

fn faces(out: &mut String, model: &ObjModel, name: &str) -> Result<()> {
    out.push_str(&format!(
        "#define {name}_tris {}\nCD3I32 {name}[{name}_tris][3];\n",
        model.triangles.len()
    ));
    for (ti, tri) in model.triangles.iter().enumerate() {
        for (corner, &index) in tri.iter().enumerate() {
            let vertex = resolve(&model.vertices, index, || {
                format!("face {} corner {}", ti + 1, corner + 1)
            })?;
            entry(out, &format!("{name}[{ti}][{corner}]"), vertex);
        }
    }
    Ok(())
}

fn parts(out: &mut String, model: &ObjModel, name: &str) -> Result<()> {
    let count = model.parts.len();
    out.push_str(&format!(
        "#define {name}_parts {count}\nI64 {name}_cnts[{count}];\nCD3I32 *{name}[{count}];\n"
    ));
    for (pi, part) in model.parts.iter().enumerate() {
        let array = format!("{name}_{pi}");
        let len = part.edges.len() * 2;
        out.push_str(&format!(
            "// {}\nCD3I32 {array}[{len}];\n",
            comment_text(&part.name)
        ));
        // the part's own edge list only decides how many edges get baked.
        // which vertices they join comes from the global edge table at the same
        // position, looked up in the part's local vertices. headers in the wild
        // were generated this way, so it stays
        for li in 0..part.edges.len() {
            let edge = model.edges.get(li).ok_or_else(|| Error::Generation {
                context: format!("part {pi} (`{}`) global line table", part.name),
                index: li + 1,
                len: model.edges.len(),
            })?;
            let context = format!("part {pi} (`{}`) line", part.name);
            edge_entries(out, &array, li, edge, &part.vertices, &context)?;
        }
        out.push_str(&format!("{name}_cnts[{pi}] = {len};\n{name}[{pi}] = {array};\n"));
    }
    Ok(())
}

// both endpoints of edge `li` land in consecutive slots 2*li and 2*li + 1
fn edge_entries(
    out: &mut String,
    array: &str,
    li: usize,
    edge: &Edge,
    vertices: &[Vertex],
    what: &str,
) -> Result<()> {
    for (end, &index) in edge.iter().enumerate() {
        let vertex = resolve(vertices, index, || format!("{what} {} endpoint {}", li + 1, end + 1))?;
        entry(out, &format!("{array}[{}]", li * 2 + end), vertex);
    }
    Ok(())
}

// a trailing `\` would splice the next line into the comment
fn comment_text(label: &str) -> String {
    label.replace('\\', "/")
}

fn entry(out: &mut String, target: &str, v: Vertex) {
    out.push_str(&format!(
        "{target}.x={};{target}.y={};{target}.z={};\n",
        v.x, v.y, v.z
    ));
}

fn resolve(vertices: &[Vertex], index: usize, context: impl FnOnce() -> String) -> Result<Vertex> {
    vertices.get(index).copied().ok_or_else(|| Error::Generation {
        context: context(),
        index: index + 1,
        len: vertices.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objparse::parse;

    fn bake(src: &str, mode: Mode, name: &str) -> Result<String> {
        let lines = src.lines().map(String::from).collect::<Vec<_>>();
        emit(&parse(&lines, mode)?, mode, name)
    }

    fn entry_lines(text: &str, prefix: &str) -> usize {
        text.lines().filter(|l| l.starts_with(prefix) && l.contains(".x=")).count()
    }

    #[test]
    fn line_mode_pairs_endpoints() {
        let text = bake("v 1 2 3\nv 4 5 6\nl 1 2\n", Mode::Line, "FOO").unwrap();
        assert_eq!(
            text,
            "#ifndef FOO_HC\n\
             #define FOO_HC\n\
             \n\
             #define FOO_cnt 2\n\
             CD3I32 FOO[FOO_cnt];\n\
             FOO[0].x=1;FOO[0].y=2;FOO[0].z=3;\n\
             FOO[1].x=4;FOO[1].y=5;FOO[1].z=6;\n\
             \n\
             #endif\n"
        );
    }

    #[test]
    fn line_mode_size_tracks_edge_count() {
        let text = bake(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nl 1 2\nl 2 3\nl 3 1\nf 1 2 3\n",
            Mode::Line,
            "TRI",
        )
        .unwrap();
        assert!(text.contains("#define TRI_cnt 6\n"));
        assert_eq!(entry_lines(&text, "TRI["), 6);
        assert!(text.contains("TRI[4].x=1;TRI[4].y=1;TRI[4].z=0;\n"));
        assert!(text.contains("TRI[5].x=0;TRI[5].y=0;TRI[5].z=0;\n"));
    }

    #[test]
    fn face_mode_flattens_corners() {
        let text = bake("v 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\n", Mode::Face, "BAR").unwrap();
        assert!(text.contains("#define BAR_tris 1\nCD3I32 BAR[BAR_tris][3];\n"));
        assert!(text.contains("BAR[0][0].x=1;BAR[0][0].y=0;BAR[0][0].z=0;\n"));
        assert!(text.contains("BAR[0][1].x=0;BAR[0][1].y=1;BAR[0][1].z=0;\n"));
        assert!(text.contains("BAR[0][2].x=0;BAR[0][2].y=0;BAR[0][2].z=1;\n"));
    }

    #[test]
    fn face_mode_repeats_shared_vertices() {
        let text = bake(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\n",
            Mode::Face,
            "QUAD",
        )
        .unwrap();
        assert!(text.contains("#define QUAD_tris 2\n"));
        assert_eq!(entry_lines(&text, "QUAD["), 6);
        assert!(text.contains("QUAD[1][0].x=0;QUAD[1][0].y=0;QUAD[1][0].z=0;\n"));
        assert!(text.contains("QUAD[1][1].x=1;QUAD[1][1].y=1;QUAD[1][1].z=0;\n"));
    }

    #[test]
    fn obj_mode_declares_every_part() {
        let src = "o a\nv 1 1 1\nv 2 2 2\nl 1 2\no b\nv 3 3 3\nv 4 4 4\nl 3 4\n";
        let text = bake(src, Mode::Obj, "BAZ").unwrap();
        assert!(text.starts_with("#ifndef BAZ_HC\n#define BAZ_HC\n\n"));
        assert!(text.ends_with("\n#endif\n"));
        assert!(text.contains("#define BAZ_parts 2\nI64 BAZ_cnts[2];\nCD3I32 *BAZ[2];\n"));
        assert!(text.contains("// a\nCD3I32 BAZ_0[2];\n"));
        assert!(text.contains("// b\nCD3I32 BAZ_1[2];\n"));
        assert!(text.contains("BAZ_0[0].x=1;BAZ_0[0].y=1;BAZ_0[0].z=1;\n"));
        assert!(text.contains("BAZ_0[1].x=2;BAZ_0[1].y=2;BAZ_0[1].z=2;\n"));
        assert!(text.contains("BAZ_cnts[0] = 2;\nBAZ[0] = BAZ_0;\n"));
        assert!(text.contains("BAZ_cnts[1] = 2;\nBAZ[1] = BAZ_1;\n"));
    }

    #[test]
    fn obj_mode_resolves_through_the_global_line_table() {
        // part b's own edge is `l 3 4`, which can't index its two local
        // vertices. the first global edge (1, 2) is used instead
        let src = "o a\nv 1 1 1\nv 2 2 2\nl 1 2\no b\nv 3 3 3\nv 4 4 4\nl 3 4\n";
        let text = bake(src, Mode::Obj, "BAZ").unwrap();
        assert!(text.contains("BAZ_1[0].x=3;BAZ_1[0].y=3;BAZ_1[0].z=3;\n"));
        assert!(text.contains("BAZ_1[1].x=4;BAZ_1[1].y=4;BAZ_1[1].z=4;\n"));

        // same position, different global edge: part b now follows `l 2 1`
        let src = "o a\nv 1 1 1\nv 2 2 2\nl 2 1\no b\nv 3 3 3\nv 4 4 4\nl 3 4\n";
        let text = bake(src, Mode::Obj, "BAZ").unwrap();
        assert!(text.contains("BAZ_1[0].x=4;BAZ_1[0].y=4;BAZ_1[0].z=4;\n"));
        assert!(text.contains("BAZ_1[1].x=3;BAZ_1[1].y=3;BAZ_1[1].z=3;\n"));
    }

    #[test]
    fn obj_mode_global_index_past_local_vertices_fails() {
        let src = "o a\nv 0 0 0\nv 1 1 1\nv 2 2 2\nl 2 3\no b\nv 5 5 5\nv 6 6 6\nl 4 5\n";
        match bake(src, Mode::Obj, "BAD") {
            Err(Error::Generation { context, index, len }) => {
                assert!(context.starts_with("part 1"), "{}", context);
                assert_eq!((index, len), (3, 2));
            }
            other => panic!("expected a generation error, got {:?}", other),
        }
    }

    #[test]
    fn obj_mode_without_markers_is_empty_but_valid() {
        let text = bake("v 1 1 1\nv 2 2 2\nl 1 2\n", Mode::Obj, "NONE").unwrap();
        assert_eq!(
            text,
            "#ifndef NONE_HC\n#define NONE_HC\n\n\
             #define NONE_parts 0\nI64 NONE_cnts[0];\nCD3I32 *NONE[0];\n\
             \n#endif\n"
        );
    }

    #[test]
    fn part_label_cannot_swallow_the_declaration() {
        let text = bake("o wing\\\nv 1 1 1\nv 2 2 2\nl 1 2\n", Mode::Obj, "P").unwrap();
        let mut lines = text.lines().skip_while(|l| !l.starts_with("// "));
        let comment = lines.next().unwrap();
        assert!(!comment.ends_with('\\'), "{}", comment);
        assert_eq!(lines.next(), Some("CD3I32 P_0[2];"));
        assert!(!text.contains('\\'));
    }

    #[test]
    fn obj_mode_edgeless_part_gets_empty_array() {
        let text = bake("o a\nv 1 1 1\nl 1 1\no dot\nv 2 2 2\n", Mode::Obj, "P").unwrap();
        assert!(text.contains("CD3I32 P_1[0];\nP_cnts[1] = 0;\nP[1] = P_1;\n"));
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        match bake("v 1 2 3\nv 4 5 6\nl 1 3\n", Mode::Line, "OOR") {
            Err(Error::Generation { context, index, len }) => {
                assert_eq!(context, "line 1 endpoint 2");
                assert_eq!((index, len), (3, 2));
            }
            other => panic!("expected a generation error, got {:?}", other),
        }
        assert!(matches!(
            bake("v 1 2 3\nf 1 1 2\n", Mode::Face, "OOR"),
            Err(Error::Generation { index: 2, len: 1, .. })
        ));
    }

    #[test]
    fn references_are_only_checked_for_the_selected_mode() {
        // a dangling face doesn't matter when only edges are baked
        let text = bake("v 1 2 3\nl 1 1\nf 1 2 3\n", Mode::Line, "OK").unwrap();
        assert!(text.contains("#define OK_cnt 2\n"));
    }

    #[test]
    fn output_is_deterministic() {
        let src = "o a\nv 1 1 1\nv 2 2 2\nl 1 2\nf 1 2 2\n";
        for mode in [Mode::Line, Mode::Face, Mode::Obj] {
            assert_eq!(bake(src, mode, "D").unwrap(), bake(src, mode, "D").unwrap());
        }
    }
}
