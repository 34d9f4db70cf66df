//! ---
//! rome_section: "03-code-generation"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "C printer for the header IR."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use std::fmt::{self, Display, Formatter};

use crate::ir::{
    CField, DisableSwitch, FrameStruct, HeaderFile, HelperPair, IdentifierEnum,
    MaxPayloadDefine, PayloadUnion, SendMacro, SetMacro,
};

const INDENT: &str = "  ";

fn pad(f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_field(f: &mut Formatter<'_>, field: &CField, depth: usize) -> fmt::Result {
    pad(f, depth)?;
    writeln!(f, "{} {};", field.c_type, field.name)
}

fn write_union(f: &mut Formatter<'_>, union: &PayloadUnion, depth: usize) -> fmt::Result {
    pad(f, depth)?;
    f.write_str("union {\n")?;
    for member in &union.members {
        pad(f, depth + 1)?;
        f.write_str("struct {\n")?;
        for field in &member.fields {
            write_field(f, field, depth + 2)?;
        }
        pad(f, depth + 1)?;
        writeln!(f, "}} {};", member.name)?;
    }
    pad(f, depth)?;
    f.write_str("};\n")
}

/// `, a, b` for a non-empty list, nothing otherwise.
fn trailing_args(args: &[String], wrap: bool) -> String {
    args.iter()
        .map(|a| if wrap { format!(", ({a})") } else { format!(", {a}") })
        .collect()
}

impl Display for IdentifierEnum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("typedef enum {\n")?;
        for entry in &self.entries {
            writeln!(f, "{INDENT}{} = 0x{:02X},", entry.name, entry.value)?;
        }
        writeln!(f, "}} {};", self.type_name)
    }
}

impl Display for PayloadUnion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_union(f, self, 0)
    }
}

impl Display for FrameStruct {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("typedef struct {\n")?;
        for field in &self.header {
            write_field(f, field, 1)?;
        }
        write_union(f, &self.payload, 1)?;
        writeln!(f, "}} {};", self.type_name)
    }
}

impl Display for MaxPayloadDefine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "#define {} {}", self.name, self.value)
    }
}

impl Display for SetMacro {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "#define {}({}{}) do {{ \\",
            self.name,
            self.frame_arg,
            trailing_args(&self.args, false)
        )?;
        for assignment in &self.assignments {
            writeln!(
                f,
                "{INDENT}({})->{} = {}; \\",
                self.frame_arg, assignment.target, assignment.value
            )?;
        }
        f.write_str("} while(0)\n")
    }
}

impl Display for SendMacro {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "#define {}({}{}) do {{ \\",
            self.name,
            self.handle_arg,
            trailing_args(&self.args, false)
        )?;
        writeln!(f, "{INDENT}{} {}; \\", self.frame_type, self.frame_var)?;
        writeln!(
            f,
            "{INDENT}{}(&{}{}); \\",
            self.set_macro,
            self.frame_var,
            trailing_args(&self.args, true)
        )?;
        writeln!(
            f,
            "{INDENT}{}(({}), &{}); \\",
            self.send_function, self.handle_arg, self.frame_var
        )?;
        f.write_str("} while(0)\n")
    }
}

impl Display for HelperPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.set, self.send)
    }
}

impl Display for DisableSwitch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "#ifdef {}", self.flag)?;
        writeln!(f, "# define {} {}", self.constant, self.sentinel)?;
        f.write_str("#endif\n")
    }
}

/// Concatenate rendered items, separated by `sep`.
pub fn join<T: Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

impl Display for HeaderFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "/* {} */", self.banner)?;
        writeln!(f, "#ifndef {}", self.guard)?;
        writeln!(f, "#define {}", self.guard)?;
        f.write_str("\n")?;
        for include in &self.includes {
            writeln!(f, "#include <{include}>")?;
        }
        f.write_str("\n")?;
        writeln!(f, "{}", self.max_payload)?;
        writeln!(f, "{}", self.identifiers)?;
        writeln!(f, "{}", self.frame)?;
        for switch in &self.disable_switches {
            write!(f, "{switch}")?;
        }
        for helper in &self.helpers {
            write!(f, "\n{helper}")?;
        }
        writeln!(f, "\n#endif /* {} */", self.guard)
    }
}
