//! ---
//! rome_section: "03-code-generation"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Typed intermediate representation of the generated header."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
//! Header IR.
//!
//! Every node is fully named and ordered by the lowering pass; the printer
//! only turns nodes into text and makes no decisions of its own.

use serde::Serialize;

/// `<c_type> <name>;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CField {
    pub c_type: String,
    pub name: String,
}

impl CField {
    pub fn new(c_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            c_type: c_type.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumEntry {
    pub name: String,
    pub value: u8,
}

/// Identifier constants, ascending by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierEnum {
    pub type_name: String,
    pub entries: Vec<EnumEntry>,
}

/// One struct member of the payload union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionMember {
    pub name: String,
    pub fields: Vec<CField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadUnion {
    pub members: Vec<UnionMember>,
}

/// Frame header fields followed by the anonymous payload union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameStruct {
    pub type_name: String,
    pub header: Vec<CField>,
    pub payload: PayloadUnion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaxPayloadDefine {
    pub name: String,
    pub value: usize,
}

/// `(<frame>)-><target> = <value>;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub target: String,
    pub value: String,
}

/// Populates a frame in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetMacro {
    pub name: String,
    pub frame_arg: String,
    pub args: Vec<String>,
    pub assignments: Vec<Assignment>,
}

/// Populates a local frame and hands it to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMacro {
    pub name: String,
    pub handle_arg: String,
    pub args: Vec<String>,
    pub frame_type: String,
    pub frame_var: String,
    pub set_macro: String,
    pub send_function: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelperPair {
    pub set: SetMacro,
    pub send: SendMacro,
}

/// `#ifdef <flag>` / `# define <constant> <sentinel>` / `#endif`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisableSwitch {
    pub flag: String,
    pub constant: String,
    pub sentinel: u8,
}

/// Complete header, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderFile {
    pub banner: String,
    pub guard: String,
    pub includes: Vec<String>,
    pub max_payload: MaxPayloadDefine,
    pub identifiers: IdentifierEnum,
    pub frame: FrameStruct,
    pub disable_switches: Vec<DisableSwitch>,
    pub helpers: Vec<HelperPair>,
}
