//! OpenGL 3.3 renderer for the driving scene.
//!
//! Draws the ground plane, its grid lines, and the vehicle's boxes under a
//! perspective camera. Lambert-style shading with one directional light.

use std::mem;
use std::sync::Arc;

use glam::Mat4;
use glow::*;

use crate::camera::Camera;
use crate::constants::*;
use crate::scene::Scene;
use crate::transform::Transform;

const MESH_VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aNormal;

uniform mat4 uMvp;
uniform mat4 uModel;

out vec3 vNormal;

void main() {
    gl_Position = uMvp * vec4(aPos, 1.0);
    vNormal = mat3(uModel) * aNormal;
}
"#;

const MESH_FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
in vec3 vNormal;

uniform vec3 uColor;
uniform vec3 uLightDir;
uniform float uAmbient;
uniform float uDiffuse;

out vec4 FragColor;

void main() {
    vec3 n = normalize(vNormal);
    float lit = uAmbient + uDiffuse * max(dot(n, normalize(uLightDir)), 0.0);
    FragColor = vec4(uColor * min(lit, 1.0), 1.0);
}
"#;

const GRID_LINE_VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec3 aPos;

uniform mat4 uMvp;

void main() {
    gl_Position = uMvp * vec4(aPos, 1.0);
}
"#;

const GRID_LINE_FRAGMENT_SHADER: &str = r#"#version 330 core
out vec4 FragColor;

void main() {
    FragColor = vec4(0.15, 0.15, 0.15, 0.35);
}
"#;

pub struct Renderer {
    gl: Arc<glow::Context>,
    program: NativeProgram,
    mvp_loc: NativeUniformLocation,
    model_loc: NativeUniformLocation,
    color_loc: NativeUniformLocation,
    light_dir_loc: NativeUniformLocation,
    ambient_loc: NativeUniformLocation,
    diffuse_loc: NativeUniformLocation,
    cube_vao: NativeVertexArray,
    cube_vbo: NativeBuffer,
    ground_vao: NativeVertexArray,
    ground_vbo: NativeBuffer,
    // Grid line rendering
    grid_program: NativeProgram,
    grid_mvp_loc: NativeUniformLocation,
    grid_vao: NativeVertexArray,
    grid_vbo: NativeBuffer,
    grid_vertex_count: i32,
}

impl Renderer {
    pub fn new(gl: Arc<glow::Context>, scene: &Scene) -> Result<Self, String> {
        unsafe {
            let program = compile_program(&gl, MESH_VERTEX_SHADER_SRC, MESH_FRAGMENT_SHADER_SRC)?;
            let mvp_loc = gl
                .get_uniform_location(program, "uMvp")
                .ok_or("Failed to get uMvp uniform location")?;
            let model_loc = gl
                .get_uniform_location(program, "uModel")
                .ok_or("Failed to get uModel uniform location")?;
            let color_loc = gl
                .get_uniform_location(program, "uColor")
                .ok_or("Failed to get uColor uniform location")?;
            let light_dir_loc = gl
                .get_uniform_location(program, "uLightDir")
                .ok_or("Failed to get uLightDir uniform location")?;
            let ambient_loc = gl
                .get_uniform_location(program, "uAmbient")
                .ok_or("Failed to get uAmbient uniform location")?;
            let diffuse_loc = gl
                .get_uniform_location(program, "uDiffuse")
                .ok_or("Failed to get uDiffuse uniform location")?;

            // Unit cube, positions + normals
            let cube_vertices = unit_cube_vertices();
            let (cube_vao, cube_vbo) = upload_mesh(&gl, &cube_vertices)?;

            // Unit quad on the XZ plane, facing up
            let ground_vertices = ground_quad_vertices();
            let (ground_vao, ground_vbo) = upload_mesh(&gl, &ground_vertices)?;

            // Grid lines over the ground, static for the scene's lifetime
            let grid_program =
                compile_program(&gl, GRID_LINE_VERTEX_SHADER, GRID_LINE_FRAGMENT_SHADER)?;
            let grid_mvp_loc = gl
                .get_uniform_location(grid_program, "uMvp")
                .ok_or("Failed to get grid uMvp uniform location")?;

            let grid_vertices = grid_line_vertices(scene.ground_half_extent, scene.grid_step);
            let grid_vertex_count = (grid_vertices.len() / 3) as i32;

            let grid_vao = gl
                .create_vertex_array()
                .map_err(|e| format!("Failed to create grid VAO: {}", e))?;
            gl.bind_vertex_array(Some(grid_vao));

            let grid_vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create grid VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(grid_vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&grid_vertices), STATIC_DRAW);
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, FLOAT, false, 3 * mem::size_of::<f32>() as i32, 0);

            gl.bind_vertex_array(None);

            gl.enable(DEPTH_TEST);

            Ok(Self {
                gl,
                program,
                mvp_loc,
                model_loc,
                color_loc,
                light_dir_loc,
                ambient_loc,
                diffuse_loc,
                cube_vao,
                cube_vbo,
                ground_vao,
                ground_vbo,
                grid_program,
                grid_mvp_loc,
                grid_vao,
                grid_vbo,
                grid_vertex_count,
            })
        }
    }

    pub fn resize(&self, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
    }

    /// Draw the scene with the vehicle under the container transform.
    pub fn render(
        &mut self,
        camera: &Camera,
        scene: &Scene,
        container: &Transform,
    ) -> Result<(), String> {
        let view_projection = camera.projection_matrix() * camera.view_matrix();

        unsafe {
            self.gl.use_program(Some(self.program));
            self.gl.uniform_3_f32(
                Some(&self.light_dir_loc),
                scene.light_direction.x,
                scene.light_direction.y,
                scene.light_direction.z,
            );
            self.gl
                .uniform_1_f32(Some(&self.ambient_loc), AMBIENT_INTENSITY);
            self.gl
                .uniform_1_f32(Some(&self.diffuse_loc), DIRECTIONAL_INTENSITY);

            // Ground plane
            self.gl.bind_vertex_array(Some(self.ground_vao));
            let ground_model = Mat4::from_scale(glam::Vec3::new(
                scene.ground_half_extent * 2.0,
                1.0,
                scene.ground_half_extent * 2.0,
            ));
            self.set_mesh_uniforms(view_projection * ground_model, ground_model, GROUND_COLOR);
            self.gl.draw_arrays(TRIANGLES, 0, 6);

            // Vehicle boxes, all parented to the container
            self.gl.bind_vertex_array(Some(self.cube_vao));
            let container_matrix = container.matrix();
            for part in &scene.car {
                let model = container_matrix
                    * Mat4::from_translation(part.offset)
                    * Mat4::from_scale(part.size);
                self.set_mesh_uniforms(view_projection * model, model, part.color);
                self.gl.draw_arrays(TRIANGLES, 0, 36);
            }

            self.gl.bind_vertex_array(None);

            self.render_grid_lines(view_projection);
        }

        Ok(())
    }

    unsafe fn set_mesh_uniforms(&self, mvp: Mat4, model: Mat4, color: [f32; 3]) {
        self.gl
            .uniform_matrix_4_f32_slice(Some(&self.mvp_loc), false, mvp.as_ref());
        self.gl
            .uniform_matrix_4_f32_slice(Some(&self.model_loc), false, model.as_ref());
        self.gl
            .uniform_3_f32(Some(&self.color_loc), color[0], color[1], color[2]);
    }

    fn render_grid_lines(&self, view_projection: Mat4) {
        unsafe {
            self.gl.enable(BLEND);
            self.gl.blend_func(SRC_ALPHA, ONE_MINUS_SRC_ALPHA);

            self.gl.use_program(Some(self.grid_program));
            self.gl.bind_vertex_array(Some(self.grid_vao));

            self.gl.uniform_matrix_4_f32_slice(
                Some(&self.grid_mvp_loc),
                false,
                view_projection.as_ref(),
            );
            self.gl.draw_arrays(LINES, 0, self.grid_vertex_count);

            self.gl.bind_vertex_array(None);
            self.gl.disable(BLEND);
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
            self.gl.delete_vertex_array(self.cube_vao);
            self.gl.delete_buffer(self.cube_vbo);
            self.gl.delete_vertex_array(self.ground_vao);
            self.gl.delete_buffer(self.ground_vbo);
            self.gl.delete_program(self.grid_program);
            self.gl.delete_vertex_array(self.grid_vao);
            self.gl.delete_buffer(self.grid_vbo);
        }
    }
}

unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<NativeProgram, String> {
    let vertex_shader = gl
        .create_shader(VERTEX_SHADER)
        .map_err(|e| format!("Failed to create vertex shader: {}", e))?;
    gl.shader_source(vertex_shader, vertex_src);
    gl.compile_shader(vertex_shader);
    if !gl.get_shader_compile_status(vertex_shader) {
        return Err(gl.get_shader_info_log(vertex_shader));
    }

    let fragment_shader = gl
        .create_shader(FRAGMENT_SHADER)
        .map_err(|e| format!("Failed to create fragment shader: {}", e))?;
    gl.shader_source(fragment_shader, fragment_src);
    gl.compile_shader(fragment_shader);
    if !gl.get_shader_compile_status(fragment_shader) {
        return Err(gl.get_shader_info_log(fragment_shader));
    }

    let program = gl
        .create_program()
        .map_err(|e| format!("Failed to create program: {}", e))?;
    gl.attach_shader(program, vertex_shader);
    gl.attach_shader(program, fragment_shader);
    gl.link_program(program);
    if !gl.get_program_link_status(program) {
        return Err(gl.get_program_info_log(program));
    }

    gl.delete_shader(vertex_shader);
    gl.delete_shader(fragment_shader);

    Ok(program)
}

/// Upload interleaved position+normal vertices into a fresh VAO/VBO pair.
unsafe fn upload_mesh(
    gl: &glow::Context,
    vertices: &[f32],
) -> Result<(NativeVertexArray, NativeBuffer), String> {
    let vao = gl
        .create_vertex_array()
        .map_err(|e| format!("Failed to create VAO: {}", e))?;
    gl.bind_vertex_array(Some(vao));

    let vbo = gl
        .create_buffer()
        .map_err(|e| format!("Failed to create VBO: {}", e))?;
    gl.bind_buffer(ARRAY_BUFFER, Some(vbo));
    gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(vertices), STATIC_DRAW);

    let stride = 6 * mem::size_of::<f32>() as i32;
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_f32(0, 3, FLOAT, false, stride, 0);
    gl.enable_vertex_attrib_array(1);
    gl.vertex_attrib_pointer_f32(1, 3, FLOAT, false, stride, 3 * mem::size_of::<f32>() as i32);

    gl.bind_vertex_array(None);
    Ok((vao, vbo))
}

/// 36 vertices of a unit cube centered at the origin, position then normal.
fn unit_cube_vertices() -> Vec<f32> {
    // (normal, four corners) per face; corners wound counter-clockwise
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +X
        (
            [1.0, 0.0, 0.0],
            [
                [0.5, -0.5, -0.5],
                [0.5, 0.5, -0.5],
                [0.5, 0.5, 0.5],
                [0.5, -0.5, 0.5],
            ],
        ),
        // -X
        (
            [-1.0, 0.0, 0.0],
            [
                [-0.5, -0.5, 0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, -0.5],
                [-0.5, -0.5, -0.5],
            ],
        ),
        // +Y
        (
            [0.0, 1.0, 0.0],
            [
                [-0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, -0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
        // -Y
        (
            [0.0, -1.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [0.5, -0.5, -0.5],
                [0.5, -0.5, 0.5],
                [-0.5, -0.5, 0.5],
            ],
        ),
        // +Z
        (
            [0.0, 0.0, 1.0],
            [
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5],
            ],
        ),
        // -Z
        (
            [0.0, 0.0, -1.0],
            [
                [0.5, -0.5, -0.5],
                [-0.5, -0.5, -0.5],
                [-0.5, 0.5, -0.5],
                [0.5, 0.5, -0.5],
            ],
        ),
    ];

    let mut vertices = Vec::with_capacity(36 * 6);
    for (normal, corners) in &faces {
        for &index in &[0usize, 1, 2, 0, 2, 3] {
            vertices.extend_from_slice(&corners[index]);
            vertices.extend_from_slice(normal);
        }
    }
    vertices
}

/// Unit quad on the XZ plane centered at the origin, facing +Y.
fn ground_quad_vertices() -> Vec<f32> {
    let corners = [
        [-0.5, 0.0, -0.5],
        [-0.5, 0.0, 0.5],
        [0.5, 0.0, 0.5],
        [0.5, 0.0, -0.5],
    ];
    let normal = [0.0, 1.0, 0.0];
    let mut vertices = Vec::with_capacity(6 * 6);
    for &index in &[0usize, 1, 2, 0, 2, 3] {
        vertices.extend_from_slice(&corners[index]);
        vertices.extend_from_slice(&normal);
    }
    vertices
}

/// Line endpoints covering the ground with a square grid, lifted slightly
/// above the plane to avoid z-fighting.
fn grid_line_vertices(half_extent: f32, step: f32) -> Vec<f32> {
    let y = 0.05;
    let mut vertices = Vec::new();
    let count = (half_extent * 2.0 / step) as i32;
    for i in 0..=count {
        let offset = -half_extent + i as f32 * step;
        // Line along Z
        vertices.extend_from_slice(&[offset, y, -half_extent]);
        vertices.extend_from_slice(&[offset, y, half_extent]);
        // Line along X
        vertices.extend_from_slice(&[-half_extent, y, offset]);
        vertices.extend_from_slice(&[half_extent, y, offset]);
    }
    vertices
}

fn as_u8_slice<T>(data: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(data.as_ptr() as *const u8, data.len() * mem::size_of::<T>())
    }
}
