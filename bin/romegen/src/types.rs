//! ---
//! rome_section: "05-command-line"
//! rome_subsection: "binary"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "The types subcommand: list the type registry."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use anyhow::Result;
use rome_schema::PrimitiveType;

pub fn run() -> Result<()> {
    print!("{}", registry_table());
    Ok(())
}

fn kind(ty: PrimitiveType) -> &'static str {
    if ty.is_float() {
        "float"
    } else if ty.is_signed() {
        "signed"
    } else {
        "unsigned"
    }
}

pub fn registry_table() -> String {
    let mut out = String::from("TYPE  C TYPE    BYTES  KIND\n");
    for ty in PrimitiveType::ALL {
        out.push_str(&format!(
            "{:<4}  {:<8}  {:<5}  {}\n",
            ty.short_name(),
            ty.wire_name(),
            ty.byte_size(),
            kind(ty)
        ));
    }
    out
}
