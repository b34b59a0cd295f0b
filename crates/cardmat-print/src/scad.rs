//! OpenSCAD lookup table of marker bit matrices.
//!
//! The generated function returns the interior matrix of a marker id, for
//! extruding raised cells (`1`) over a recessed base (`0`):
//!
//! ```text
//! function get_marker_bits(id) =
//!     (id == 0) ? [
//!         [1,0,1,1,0,0],
//!         ...
//!     ] :
//!     undef;
//! ```

use std::fmt::Write;

use cardmat_aruco::{extract, BitMatrix, ExtractError, MarkerDictionary};
use cardmat_layout::{Corner, CORNER_IDS};

/// Name of the generated OpenSCAD function.
pub const FUNCTION_NAME: &str = "get_marker_bits";

pub const LEGEND: &str = "// 1 = Raised (Black/Marker Color), 0 = Recessed (White/Base Color)";

fn corner_of(id: u32) -> Option<Corner> {
    CORNER_IDS
        .iter()
        .position(|&c| c == id)
        .map(|i| Corner::ALL[i])
}

fn write_matrix(out: &mut String, bits: &BitMatrix) {
    let rows: Vec<String> = bits
        .rows()
        .map(|r| {
            let cells: Vec<String> = r.iter().map(u8::to_string).collect();
            format!("        [{}]", cells.join(","))
        })
        .collect();
    out.push_str(&rows.join(",\n"));
    out.push('\n');
}

/// Generate the lookup function for `ids` (in the given order).
pub fn generate<D: MarkerDictionary + ?Sized>(dict: &D, ids: &[u32]) -> Result<String, ExtractError> {
    // Extract everything first so an invalid id produces no partial output.
    let mats = ids
        .iter()
        .map(|&id| extract(dict, id).map(|m| (id, m)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "// Marker bit matrices for {} ({}x{} interior, border stripped).",
        dict.name(),
        dict.interior_size(),
        dict.interior_size()
    );
    let _ = writeln!(out, "{LEGEND}");
    out.push('\n');
    let _ = writeln!(out, "function {FUNCTION_NAME}(id) =");
    for (id, bits) in &mats {
        match corner_of(*id) {
            Some(corner) => {
                let _ = writeln!(out, "    // ID {id} ({})", corner.abbrev());
            }
            None => {
                let _ = writeln!(out, "    // ID {id}");
            }
        }
        let _ = writeln!(out, "    (id == {id}) ? [");
        write_matrix(&mut out, bits);
        let _ = writeln!(out, "    ] :");
    }
    let _ = writeln!(out, "    undef;");
    Ok(out)
}

/// Lookup table for the four mat markers.
pub fn generate_mat<D: MarkerDictionary + ?Sized>(dict: &D) -> Result<String, ExtractError> {
    generate(dict, &CORNER_IDS)
}
