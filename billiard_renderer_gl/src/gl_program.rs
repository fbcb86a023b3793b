/// Program - shader compilation, linking and uniform upload
///
/// Every stage gets the version header and the program defines prepended
/// (`compose_shader_source`). After linking, active uniforms are reflected
/// once into a name -> location map; array uniforms are keyed by their base
/// name (`u_ClipPlanes` for `u_ClipPlanes[0]`).

use billiard_engine::billiard::render::{
    compose_shader_source, Program, ProgramDesc, ShaderStage, UniformValue,
};
use billiard_engine::billiard::{Error, Result};
use billiard_engine::{engine_debug, engine_err, engine_error, engine_warn};
use glow::HasContext;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use std::rc::Rc;

pub fn gl_shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::TessControl => glow::TESS_CONTROL_SHADER,
        ShaderStage::TessEvaluation => glow::TESS_EVALUATION_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// Name an active uniform is looked up by: array uniforms lose their `[0]`
pub fn uniform_base_name(active_name: &str) -> &str {
    active_name.strip_suffix("[0]").unwrap_or(active_name)
}

/// Reflected active uniform
struct UniformSlot {
    location: glow::UniformLocation,
    /// Array length (1 for plain uniforms)
    size: i32,
}

pub struct GlProgram {
    gl: Rc<glow::Context>,
    pub(crate) program: glow::Program,
    name: String,
    uniforms: FxHashMap<String, UniformSlot>,
    /// Names already reported as missing, so each is logged once
    warned: RefCell<FxHashSet<String>>,
}

fn compile_stage(gl: &glow::Context, program_name: &str, stage: ShaderStage, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = gl.create_shader(gl_shader_type(stage)).map_err(|e| {
            engine_err!("billiard::gl::Program", "Failed to create {} shader: {}", stage.name(), e)
        })?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            engine_error!(
                "billiard::gl::Program",
                "Program '{}': {} shader failed to compile:\n{}",
                program_name,
                stage.name(),
                log
            );
            return Err(Error::ShaderCompilation {
                stage: stage.name().to_string(),
                log,
            });
        }
        Ok(shader)
    }
}

impl GlProgram {
    pub(crate) fn new(gl: Rc<glow::Context>, desc: &ProgramDesc) -> Result<Self> {
        desc.validate()?;

        let program = unsafe { gl.create_program() }
            .map_err(|e| engine_err!("billiard::gl::Program", "Failed to create program '{}': {}", desc.name, e))?;
        // owned from here so every early return deletes it
        let mut result = Self {
            gl,
            program,
            name: desc.name.clone(),
            uniforms: FxHashMap::default(),
            warned: RefCell::new(FxHashSet::default()),
        };

        let mut shaders = Vec::with_capacity(desc.stages.len());
        for stage in &desc.stages {
            let source = compose_shader_source(&desc.defines, &stage.source);
            match compile_stage(&result.gl, &desc.name, stage.stage, &source) {
                Ok(shader) => shaders.push(shader),
                Err(e) => {
                    result.delete_shaders(&shaders);
                    return Err(e);
                }
            }
        }

        let linked = unsafe {
            for &shader in &shaders {
                result.gl.attach_shader(program, shader);
            }
            result.gl.link_program(program);
            for &shader in &shaders {
                result.gl.detach_shader(program, shader);
            }
            result.gl.get_program_link_status(program)
        };
        result.delete_shaders(&shaders);

        if !linked {
            let log = unsafe { result.gl.get_program_info_log(program) };
            engine_error!("billiard::gl::Program", "Program '{}' failed to link:\n{}", desc.name, log);
            return Err(Error::ProgramLink(format!("{}: {}", desc.name, log)));
        }

        result.reflect_uniforms();
        engine_debug!(
            "billiard::gl::Program",
            "Program '{}' linked with {} active uniform(s)",
            result.name,
            result.uniforms.len()
        );
        Ok(result)
    }

    fn delete_shaders(&self, shaders: &[glow::Shader]) {
        for &shader in shaders {
            unsafe { self.gl.delete_shader(shader) };
        }
    }

    fn reflect_uniforms(&mut self) {
        let gl = &self.gl;
        let count = unsafe { gl.get_active_uniforms(self.program) };
        for index in 0..count {
            let Some(active) = (unsafe { gl.get_active_uniform(self.program, index) }) else {
                continue;
            };
            let name = uniform_base_name(&active.name).to_string();
            if let Some(location) = unsafe { gl.get_uniform_location(self.program, &name) } {
                self.uniforms.insert(name, UniformSlot { location, size: active.size });
            }
        }
    }

    fn warn_once(&self, uniform: &str, message: String) {
        if self.warned.borrow_mut().insert(uniform.to_string()) {
            engine_warn!("billiard::gl::Program", "{}", message);
        }
    }

    /// Upload `value` to `uniform`. The program must be current.
    pub(crate) fn apply(&self, uniform: &str, value: &UniformValue) {
        let Some(slot) = self.uniforms.get(uniform) else {
            self.warn_once(
                uniform,
                format!("Program '{}' has no active uniform '{}', skipped", self.name, uniform),
            );
            return;
        };
        let location = Some(&slot.location);

        unsafe {
            match value {
                UniformValue::Int(v) => self.gl.uniform_1_i32(location, *v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(location, *v),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Vec4(v) => self.gl.uniform_4_f32(location, v.x, v.y, v.z, v.w),
                UniformValue::Vec4Array(values) => {
                    let len = values.len().min(slot.size.max(0) as usize);
                    if len < values.len() {
                        self.warn_once(
                            uniform,
                            format!(
                                "Program '{}': '{}' holds {} element(s), {} given",
                                self.name,
                                uniform,
                                slot.size,
                                values.len()
                            ),
                        );
                    }
                    let flat: Vec<f32> = values[..len].iter().flat_map(|v| v.to_array()).collect();
                    self.gl.uniform_4_f32_slice(location, &flat);
                }
                UniformValue::Mat3(m) => self.gl.uniform_matrix_3_f32_slice(location, false, &m.to_cols_array()),
                UniformValue::Mat4(m) => self.gl.uniform_matrix_4_f32_slice(location, false, &m.to_cols_array()),
            }
        }
    }

    /// Whether the linker kept `uniform`
    pub fn has_uniform(&self, uniform: &str) -> bool {
        self.uniforms.contains_key(uniform)
    }
}

impl Program for GlProgram {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for GlProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
        }
    }
}

#[cfg(test)]
#[path = "gl_program_tests.rs"]
mod tests;
