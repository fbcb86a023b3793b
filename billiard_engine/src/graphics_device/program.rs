/// Shader program descriptor, uniform values and source composition

use glam::{Mat3, Mat4, Vec3, Vec4};
use crate::error::{Error, Result};

/// Header prepended to every shader stage
pub const GLSL_VERSION_HEADER: &str = "#version 410 core\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEvaluation,
    Fragment,
}

impl ShaderStage {
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::TessControl => "tessellation control",
            ShaderStage::TessEvaluation => "tessellation evaluation",
            ShaderStage::Fragment => "fragment",
        }
    }

    /// Stage implied by a file extension (`vert`, `tesc`, `tese`, `frag`)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "vert" => Some(ShaderStage::Vertex),
            "tesc" => Some(ShaderStage::TessControl),
            "tese" => Some(ShaderStage::TessEvaluation),
            "frag" => Some(ShaderStage::Fragment),
            _ => None,
        }
    }
}

/// Source text of one stage
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub source: String,
}

/// Descriptor for creating a program
#[derive(Debug, Clone)]
pub struct ProgramDesc {
    /// Debug name, shows up in logs
    pub name: String,
    /// Preprocessor lines injected after the version header (e.g. "#define DEPTH_PASS\n")
    pub defines: String,
    pub stages: Vec<ShaderSource>,
}

impl ProgramDesc {
    /// A program needs exactly one vertex and one fragment stage, and
    /// tessellation stages come in pairs.
    pub fn validate(&self) -> Result<()> {
        let count = |stage| self.stages.iter().filter(|s| s.stage == stage).count();
        if count(ShaderStage::Vertex) != 1 || count(ShaderStage::Fragment) != 1 {
            return Err(Error::InvalidResource(format!(
                "Program '{}' needs one vertex and one fragment stage",
                self.name
            )));
        }
        let tesc = count(ShaderStage::TessControl);
        let tese = count(ShaderStage::TessEvaluation);
        if tesc > 1 || tese > 1 || tesc != tese {
            return Err(Error::InvalidResource(format!(
                "Program '{}' has unpaired tessellation stages",
                self.name
            )));
        }
        Ok(())
    }

    pub fn has_tessellation(&self) -> bool {
        self.stages.iter().any(|s| s.stage == ShaderStage::TessControl)
    }
}

/// Final stage source: version header, then defines, then the file body.
///
/// A `#version` line already present in the body is dropped so the
/// header stays the first statement.
pub fn compose_shader_source(defines: &str, source: &str) -> String {
    let body: String = source
        .lines()
        .filter(|line| !line.trim_start().starts_with("#version"))
        .map(|line| format!("{}\n", line))
        .collect();
    let mut out = String::with_capacity(GLSL_VERSION_HEADER.len() + defines.len() + body.len() + 1);
    out.push_str(GLSL_VERSION_HEADER);
    out.push_str(defines);
    if !defines.is_empty() && !defines.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&body);
    out
}

/// Value assigned to a named uniform
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Vec4(Vec4),
    /// Consecutive array elements starting at `name`
    Vec4Array(Vec<Vec4>),
    Mat3(Mat3),
    Mat4(Mat4),
}

/// Program resource trait
pub trait Program {
    fn name(&self) -> &str;
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
