//! ---
//! rome_section: "03-code-generation"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Lowering of a compiled schema into the header IR."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use rome_schema::{CompiledSchema, MessageLayout, PrimitiveType};

use crate::ir::{
    Assignment, CField, DisableSwitch, EnumEntry, FrameStruct, HeaderFile, HelperPair,
    IdentifierEnum, MaxPayloadDefine, PayloadUnion, SendMacro, SetMacro, UnionMember,
};
use crate::naming::{EmptyMember, NamingScheme};

const FRAME_ARG: &str = "_f";
const HANDLE_ARG: &str = "_i";
const FRAME_VAR: &str = "_frame";
const PLACEHOLDER_FIELD: &str = "_reserved";

fn arg_name(param: &str) -> String {
    format!("_a_{param}")
}

pub fn lower_identifiers(compiled: &CompiledSchema, naming: &NamingScheme) -> IdentifierEnum {
    IdentifierEnum {
        type_name: naming.identifier_type.clone(),
        entries: compiled
            .messages
            .iter()
            .map(|m| EnumEntry {
                name: naming.identifier(&m.name),
                value: m.id,
            })
            .collect(),
    }
}

pub fn lower_payload_union(compiled: &CompiledSchema, naming: &NamingScheme) -> PayloadUnion {
    PayloadUnion {
        members: compiled
            .messages
            .iter()
            .map(|m| lower_member(m, naming))
            .collect(),
    }
}

fn lower_member(message: &MessageLayout, naming: &NamingScheme) -> UnionMember {
    let mut fields: Vec<CField> = message
        .params
        .iter()
        .map(|p| CField::new(p.ty.wire_name(), p.name.clone()))
        .collect();
    if fields.is_empty() && naming.empty_member == EmptyMember::Placeholder {
        fields.push(CField::new(PrimitiveType::U8.wire_name(), PLACEHOLDER_FIELD));
    }
    UnionMember {
        name: naming.member(&message.name),
        fields,
    }
}

pub fn lower_frame(compiled: &CompiledSchema, naming: &NamingScheme) -> FrameStruct {
    FrameStruct {
        type_name: naming.frame_type.clone(),
        header: vec![
            CField::new(PrimitiveType::U8.wire_name(), naming.size_field.clone()),
            CField::new(PrimitiveType::U8.wire_name(), naming.id_field.clone()),
        ],
        payload: lower_payload_union(compiled, naming),
    }
}

pub fn lower_helper(message: &MessageLayout, naming: &NamingScheme) -> HelperPair {
    let args: Vec<String> = message.params.iter().map(|p| arg_name(&p.name)).collect();
    let member = naming.member(&message.name);

    let mut assignments = vec![
        Assignment {
            target: naming.size_field.clone(),
            value: message.payload_size.to_string(),
        },
        Assignment {
            target: naming.id_field.clone(),
            value: naming.identifier(&message.name),
        },
    ];
    assignments.extend(message.params.iter().map(|p| Assignment {
        target: format!("{member}.{}", p.name),
        value: format!("({})", arg_name(&p.name)),
    }));

    let set_name = naming.set_macro(&message.name);
    HelperPair {
        set: SetMacro {
            name: set_name.clone(),
            frame_arg: FRAME_ARG.to_owned(),
            args: args.clone(),
            assignments,
        },
        send: SendMacro {
            name: naming.send_macro(&message.name),
            handle_arg: HANDLE_ARG.to_owned(),
            args,
            frame_type: naming.frame_type.clone(),
            frame_var: FRAME_VAR.to_owned(),
            set_macro: set_name,
            send_function: naming.send_function.clone(),
        },
    }
}

pub fn lower_helpers(compiled: &CompiledSchema, naming: &NamingScheme) -> Vec<HelperPair> {
    compiled
        .messages
        .iter()
        .map(|m| lower_helper(m, naming))
        .collect()
}

pub fn lower_disable_switches(
    compiled: &CompiledSchema,
    naming: &NamingScheme,
) -> Vec<DisableSwitch> {
    compiled
        .messages
        .iter()
        .map(|m| DisableSwitch {
            flag: naming.disable_flag(&m.name),
            constant: naming.identifier(&m.name),
            sentinel: naming.disabled_sentinel,
        })
        .collect()
}

/// Text safe to place inside a `/* */` comment on a single line.
fn comment_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .replace("*/", "* /")
}

/// Lower a compiled schema into a complete header.
pub fn lower(compiled: &CompiledSchema, naming: &NamingScheme, guard: Option<&str>) -> HeaderFile {
    HeaderFile {
        banner: format!(
            "Generated by romegen from schema '{}'. Do not edit.",
            comment_text(&compiled.source_name)
        ),
        guard: guard
            .map(str::to_owned)
            .unwrap_or_else(|| naming.default_guard()),
        includes: vec!["stdint.h".to_owned()],
        max_payload: MaxPayloadDefine {
            name: naming.max_payload_define(),
            value: compiled.max_payload_size,
        },
        identifiers: lower_identifiers(compiled, naming),
        frame: lower_frame(compiled, naming),
        disable_switches: lower_disable_switches(compiled, naming),
        helpers: lower_helpers(compiled, naming),
    }
}
