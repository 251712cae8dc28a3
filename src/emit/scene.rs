//! Scene emitter.
//!
//! Writes a Godot scene for the Cyclops Level Builder plugin. Each brush
//! becomes a set of data vector sub-resources plus one `mesh_vector_data`
//! aggregate block; polygon brushes also get a `cyclops_block` node.
//!
//! Several blocks are placeholders the plugin fills in on first edit:
//! the material index block is constant, the color block holds one value
//! per face despite its stride of 4, and the face index block skips the
//! last face. Existing scenes were generated with these values, so they
//! are kept as-is.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::types::{Brush, BrushKind};

use super::buffers::{BrushBuffers, GeometryOptions};
use super::tscn::{
    ext_resource, packed, string_name, sub_resource, Attr, Fixed1, PackedKind, TscnWriter,
};

const ROOT_SCRIPT_ID: &str = "1_root";
const BLOCK_SCRIPT_ID: &str = "2_block";
const MESH_DATA_ID: &str = "3_mesh_data";
const FLOAT_VECTOR_ID: &str = "4_float";
const BYTE_VECTOR_ID: &str = "5_byte";
const INT_VECTOR_ID: &str = "6_int";

/// Data vector `data_type` codes understood by the plugin.
mod data_type {
    pub const BYTE: u8 = 0;
    pub const INT: u8 = 1;
    pub const COLOR: u8 = 4;
    pub const VECTOR3: u8 = 6;
    pub const TRANSFORM_2D: u8 = 8;
}

/// Scene-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    /// Scene uid. Defaults to `uid://<output file stem>`.
    pub uid: Option<String>,
    /// Name of the root `Node3D`.
    pub root_name: String,
    /// Script attached to the root node, if any.
    pub root_script: Option<String>,
    /// Resource path of the Cyclops Level Builder addon.
    pub addon_path: String,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            uid: None,
            root_name: "Map".to_string(),
            root_script: None,
            addon_path: "res://addons/cyclops_level_builder".to_string(),
        }
    }
}

impl SceneOptions {
    /// The scene uid, falling back to one derived from `stem`.
    pub fn uid_for(&self, stem: &str) -> String {
        self.uid
            .clone()
            .unwrap_or_else(|| format!("uid://{}", stem))
    }

    fn addon(&self, relative: &str) -> String {
        format!("{}/{}", self.addon_path.trim_end_matches('/'), relative)
    }
}

/// Counts gathered while emitting a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmitSummary {
    pub brushes: usize,
    pub mesh_brushes: usize,
    pub nodes: usize,
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
}

/// Writes brushes as a scene.
pub struct SceneEmitter<'a> {
    options: &'a SceneOptions,
    geometry: GeometryOptions,
}

impl<'a> SceneEmitter<'a> {
    pub fn new(options: &'a SceneOptions, geometry: GeometryOptions) -> Self {
        Self { options, geometry }
    }

    /// Emit the whole scene: header, per-brush resources, then nodes.
    pub fn emit<W: Write>(&self, uid: &str, brushes: &[Brush], out: W) -> Result<EmitSummary> {
        let mut w = TscnWriter::new(out);
        let mut summary = EmitSummary::default();

        self.write_header(&mut w, uid, brushes.len())?;

        for brush in brushes {
            let buffers = BrushBuffers::build(brush, self.geometry);
            debug!(
                brush = brush.id,
                kind = brush.kind().as_str(),
                vertices = buffers.num_vertices(),
                edges = buffers.num_edges(),
                "Emitting brush"
            );
            write_brush_resources(&mut w, brush, &buffers)?;

            summary.brushes += 1;
            summary.vertices += buffers.num_vertices();
            summary.edges += buffers.num_edges();
            summary.faces += buffers.face_count;
            if brush.is_mesh {
                summary.mesh_brushes += 1;
            }
        }

        summary.nodes = self.write_nodes(&mut w, brushes)?;
        w.flush()?;

        Ok(summary)
    }

    fn write_header<W: Write>(&self, w: &mut TscnWriter<W>, uid: &str, brush_count: usize) -> Result<()> {
        w.section(
            "gd_scene",
            &[
                ("load_steps", Attr::Int(brush_count + 1)),
                ("format", Attr::Int(3)),
                ("uid", Attr::Str(uid)),
            ],
        )?;
        w.blank()?;

        if let Some(script) = &self.options.root_script {
            write_script_resource(w, script, ROOT_SCRIPT_ID)?;
        }

        let scripts = [
            ("nodes/cyclops_block.gd", BLOCK_SCRIPT_ID),
            ("resources/mesh_vector_data.gd", MESH_DATA_ID),
            ("resources/data_vector_float.gd", FLOAT_VECTOR_ID),
            ("resources/data_vector_byte.gd", BYTE_VECTOR_ID),
            ("resources/data_vector_int.gd", INT_VECTOR_ID),
        ];
        for (path, id) in scripts {
            write_script_resource(w, &self.options.addon(path), id)?;
        }
        w.blank()?;

        Ok(())
    }

    /// Write the root node and one node per polygon brush. Returns the brush node count.
    pub fn write_nodes<W: Write>(&self, w: &mut TscnWriter<W>, brushes: &[Brush]) -> Result<usize> {
        w.section(
            "node",
            &[("name", Attr::Str(&self.options.root_name)), ("type", Attr::Str("Node3D"))],
        )?;
        if self.options.root_script.is_some() {
            w.assign("script", ext_resource(ROOT_SCRIPT_ID))?;
        }

        let mut nodes = 0;
        // Mesh brushes keep their resources but get no node
        for brush in brushes.iter().filter(|b| b.kind() == BrushKind::Polygon) {
            let name = brush.node_name();
            w.blank()?;
            w.section(
                "node",
                &[
                    ("name", Attr::Str(&name)),
                    ("type", Attr::Str("Node3D")),
                    ("parent", Attr::Str(".")),
                ],
            )?;
            w.assign("script", ext_resource(BLOCK_SCRIPT_ID))?;
            w.assign("mesh_vector_data", sub_resource(&brush.block_name()))?;
            nodes += 1;
        }

        Ok(nodes)
    }
}

fn write_script_resource<W: Write>(w: &mut TscnWriter<W>, path: &str, id: &str) -> Result<()> {
    w.section(
        "ext_resource",
        &[("type", Attr::Str("Script")), ("path", Attr::Str(path)), ("id", Attr::Str(id))],
    )?;
    Ok(())
}

/// One data vector sub-resource block.
struct DataVector<'a> {
    id: String,
    script: &'a str,
    data: String,
    name: &'a str,
    data_type: u8,
    stride: u8,
}

impl DataVector<'_> {
    fn write<W: Write>(&self, w: &mut TscnWriter<W>) -> Result<()> {
        w.section("sub_resource", &[("type", Attr::Str("Resource")), ("id", Attr::Str(&self.id))])?;
        w.assign("script", ext_resource(self.script))?;
        w.assign("data", &self.data)?;
        w.assign("name", string_name(self.name))?;
        w.assign("category", "\"\"")?;
        w.assign("data_type", self.data_type)?;
        w.assign("stride", self.stride)?;
        w.blank()?;
        Ok(())
    }
}

/// Resource ids for one brush. Every id embeds the brush id.
struct BrushIds {
    position: String,
    vertex_selected: String,
    edge_selected: String,
    material: String,
    uv: String,
    color: String,
    face_index: String,
    normal: String,
    vertex_index: String,
    block: String,
}

impl BrushIds {
    fn new(brush: &Brush) -> Self {
        let id = brush.id;
        Self {
            position: format!("position_{}", id),
            vertex_selected: format!("vertex_selected_{}", id),
            edge_selected: format!("edge_{}", id),
            material: format!("material_{}", id),
            uv: format!("uv_{}", id),
            color: format!("color_{}", id),
            face_index: format!("face_index_{}", id),
            normal: format!("normal_{}", id),
            vertex_index: format!("vertex_index_{}", id),
            block: brush.block_name(),
        }
    }
}

/// Write all sub-resources and the aggregate block for one brush.
pub fn write_brush_resources<W: Write>(
    w: &mut TscnWriter<W>,
    brush: &Brush,
    buffers: &BrushBuffers,
) -> Result<()> {
    let ids = BrushIds::new(brush);
    let faces = buffers.face_count;

    let positions = buffers
        .positions
        .iter()
        .flat_map(|v| [v.x, v.y, v.z])
        .map(Fixed1);
    let normals = buffers
        .normals
        .iter()
        .flat_map(|n| [n.x, n.y, n.z])
        .map(Fixed1);
    // The final face gets no entry
    let face_index = (0..faces.saturating_sub(1)).flat_map(|i| [i; 4]);

    let blocks = [
        DataVector {
            id: ids.position.clone(),
            script: FLOAT_VECTOR_ID,
            data: packed(PackedKind::Float32, positions),
            name: "position",
            data_type: data_type::VECTOR3,
            stride: 3,
        },
        DataVector {
            id: ids.vertex_selected.clone(),
            script: BYTE_VECTOR_ID,
            data: packed(PackedKind::Byte, std::iter::repeat(0).take(buffers.num_vertices())),
            name: "selected",
            data_type: data_type::BYTE,
            stride: 1,
        },
        DataVector {
            id: ids.edge_selected.clone(),
            script: BYTE_VECTOR_ID,
            data: packed(PackedKind::Byte, std::iter::repeat(0).take(buffers.edge_indices.len())),
            name: "selected",
            data_type: data_type::BYTE,
            stride: 1,
        },
        DataVector {
            id: ids.material.clone(),
            script: INT_VECTOR_ID,
            data: packed(PackedKind::Int32, [1; 6]),
            name: "material_index",
            data_type: data_type::INT,
            stride: 1,
        },
        DataVector {
            id: ids.uv.clone(),
            script: FLOAT_VECTOR_ID,
            data: packed(PackedKind::Float32, (0..faces).flat_map(|_| [1, 0, 0, 1, 0, 0])),
            name: "uv_transform",
            data_type: data_type::TRANSFORM_2D,
            stride: 6,
        },
        DataVector {
            id: ids.color.clone(),
            script: FLOAT_VECTOR_ID,
            data: packed(PackedKind::Float32, std::iter::repeat(1).take(faces)),
            name: "color",
            data_type: data_type::COLOR,
            stride: 4,
        },
        DataVector {
            id: ids.face_index.clone(),
            script: INT_VECTOR_ID,
            data: packed(PackedKind::Int32, face_index),
            name: "face_index",
            data_type: data_type::INT,
            stride: 1,
        },
        DataVector {
            id: ids.normal.clone(),
            script: FLOAT_VECTOR_ID,
            data: packed(PackedKind::Float32, normals),
            name: "normal",
            data_type: data_type::VECTOR3,
            stride: 3,
        },
        DataVector {
            id: ids.vertex_index.clone(),
            script: INT_VECTOR_ID,
            data: packed(PackedKind::Int32, &buffers.face_vertex_indices),
            name: "vertex_index",
            data_type: data_type::INT,
            stride: 1,
        },
    ];

    for block in &blocks {
        block.write(w)?;
    }

    write_aggregate_block(w, brush, buffers, &ids)
}

fn write_aggregate_block<W: Write>(
    w: &mut TscnWriter<W>,
    brush: &Brush,
    buffers: &BrushBuffers,
    ids: &BrushIds,
) -> Result<()> {
    w.section("sub_resource", &[("type", Attr::Str("Resource")), ("id", Attr::Str(&ids.block))])?;
    w.assign("script", ext_resource(MESH_DATA_ID))?;

    w.assign("num_vertices", buffers.num_vertices())?;
    w.assign("num_edges", buffers.num_edges())?;
    w.assign("num_faces", buffers.face_count)?;
    w.assign("num_face_vertices", buffers.num_face_vertices())?;

    for key in ["active_vertex", "active_edge", "active_face", "active_face_vertex"] {
        w.assign(key, -1)?;
    }

    w.assign("edge_vertex_indices", packed(PackedKind::Int32, &buffers.edge_indices))?;

    if brush.kind() == BrushKind::Polygon {
        w.assign("face_vertex_count", packed(PackedKind::Int32, &buffers.face_vertex_counts))?;
        w.assign("face_vertex_indices", packed(PackedKind::Int32, &buffers.face_vertex_indices))?;

        w.dictionary("edge_data", &[("selected", sub_resource(&ids.edge_selected))])?;
        w.dictionary(
            "face_data",
            &[
                ("selected", sub_resource(&ids.vertex_selected)),
                ("visible", sub_resource(&ids.vertex_selected)),
                ("material_index", sub_resource(&ids.material)),
                ("uv_transform", sub_resource(&ids.uv)),
                ("color", sub_resource(&ids.color)),
            ],
        )?;
        w.dictionary(
            "face_vertex_data",
            &[
                ("vertex_index", sub_resource(&ids.vertex_index)),
                ("normal", sub_resource(&ids.normal)),
                ("face_index", sub_resource(&ids.face_index)),
                ("color", sub_resource(&ids.color)),
            ],
        )?;
    }

    w.dictionary(
        "vertex_data",
        &[
            ("position", sub_resource(&ids.position)),
            ("selected", sub_resource(&ids.vertex_selected)),
        ],
    )?;
    w.blank()?;

    Ok(())
}
