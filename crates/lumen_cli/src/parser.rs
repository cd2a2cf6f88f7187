//! Scene description file parser.
//!
//! Line-oriented text, one directive per line. The first token names the
//! directive and the remaining whitespace-separated tokens are its
//! arguments. Blank lines and lines whose first token starts with `#` are
//! skipped.
//!
//! # Supported Directives
//!
//! - `eye x y z`, `viewdir x y z`, `updir x y z`
//! - `fovv degrees`, `imsize width height`, `bkgcolor r g b`
//! - `mtlcolor Odr Odg Odb Osr Osg Osb ka kd ks n`
//! - `texture path`
//! - `sphere x y z r`
//! - `light x y z w r g b` (`w` is 1 for a point light, 0 for a directional light)
//! - `v x y z`, `vt u v`, `vn x y z`
//! - `f c1 c2 c3`, corners as `v`, `v/vt`, `v//vn` or `v/vt/vn` (1-based)

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use lumen_core::{Material, Texture, TextureCache, TextureError};
use lumen_math::{Vec2, Vec3};
use lumen_renderer::{
    DirectionalLight, FaceVertex, PointLight, Scene, SceneBuilder, SceneError, Sphere,
};
use thiserror::Error;

/// Errors that can occur while reading a scene file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Invalid scene data at line {line}")]
    Scene {
        line: usize,
        #[source]
        source: SceneError,
    },

    #[error("Texture error at line {line}")]
    Texture {
        line: usize,
        #[source]
        source: TextureError,
    },

    #[error("Incomplete scene")]
    Setup(#[source] SceneError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Which optional indices the corners of a face carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CornerForm {
    Vertex,
    VertexTexCoord,
    VertexNormal,
    VertexTexCoordNormal,
}

/// Read and parse a scene file.
///
/// The scene is named after the file stem, and texture paths are resolved
/// relative to the file's directory.
pub fn parse_scene_file(path: &Path) -> ParseResult<Scene> {
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut textures = TextureCache::with_base_dir(base_dir);
    parse_scene(&content, &name, &mut textures)
}

/// Parse scene text into a verified scene.
pub fn parse_scene(content: &str, name: &str, textures: &mut TextureCache) -> ParseResult<Scene> {
    let mut parser = SceneParser::new(textures);
    parser.builder.set_name(name);

    for (index, line) in content.lines().enumerate() {
        parser.line = index + 1;
        parser.parse_line(line)?;
    }

    log::info!(
        "Parsed scene '{}': {} objects, {} lights, {} vertices",
        name,
        parser.builder.object_count(),
        parser.builder.light_count(),
        parser.builder.vert_count()
    );

    parser.builder.verify_setup().map_err(ParseError::Setup)
}

/// Parser state carried from line to line.
struct SceneParser<'c> {
    builder: SceneBuilder,
    textures: &'c mut TextureCache,
    /// Material applied to every object until the next `mtlcolor`
    material: Option<Material>,
    /// Texture for the next sphere, and for every textured face
    texture: Option<Arc<Texture>>,
    line: usize,
}

impl<'c> SceneParser<'c> {
    fn new(textures: &'c mut TextureCache) -> Self {
        Self {
            builder: SceneBuilder::new(),
            textures,
            material: None,
            texture: None,
            line: 0,
        }
    }

    fn parse_line(&mut self, line: &str) -> ParseResult<()> {
        let mut tokens = line.split_whitespace();
        let Some(directive) = tokens.next() else {
            return Ok(());
        };
        if directive.starts_with('#') {
            return Ok(());
        }
        let args: Vec<&str> = tokens.collect();

        match directive {
            "eye" => {
                let eye = self.vec3(&args)?;
                self.builder.set_eye_pos(eye);
            }
            "viewdir" => {
                let view = self.vec3(&args)?;
                self.builder.set_view_dir(view).map_err(|e| self.scene_error(e))?;
            }
            "updir" => {
                let up = self.vec3(&args)?;
                self.builder.set_up_dir(up).map_err(|e| self.scene_error(e))?;
            }
            "fovv" => {
                let [fovv] = self.numbers::<f32, 1>(&args)?;
                self.builder.set_fovv(fovv).map_err(|e| self.scene_error(e))?;
            }
            "imsize" => {
                let [width, height] = self.numbers::<u32, 2>(&args)?;
                self.builder
                    .set_image_size(width, height)
                    .map_err(|e| self.scene_error(e))?;
            }
            "bkgcolor" => {
                let color = self.vec3(&args)?;
                self.builder.set_bkg_color(color);
            }
            "mtlcolor" => self.parse_material(&args)?,
            "texture" => self.parse_texture(&args)?,
            "sphere" => self.parse_sphere(&args)?,
            "light" => self.parse_light(&args)?,
            "v" => {
                let position = self.vec3(&args)?;
                self.builder.add_vert(position);
            }
            "vt" => {
                let [u, v] = self.numbers::<f32, 2>(&args)?;
                self.builder
                    .add_texture_coords(Vec2::new(u, v))
                    .map_err(|e| self.scene_error(e))?;
            }
            "vn" => {
                let normal = self.vec3(&args)?;
                self.builder.add_normal(normal).map_err(|e| self.scene_error(e))?;
            }
            "f" => self.parse_face(&args)?,
            other => return Err(self.syntax(format!("unknown directive '{}'", other))),
        }

        Ok(())
    }

    fn parse_material(&mut self, args: &[&str]) -> ParseResult<()> {
        let [odr, odg, odb, osr, osg, osb, ka, kd, ks, n] = self.numbers::<f32, 10>(args)?;
        let material = Material::new(
            Vec3::new(odr, odg, odb),
            Vec3::new(osr, osg, osb),
            ka,
            kd,
            ks,
            n,
        )
        .map_err(|e| self.scene_error(e.into()))?;

        self.material = Some(material);
        Ok(())
    }

    fn parse_texture(&mut self, args: &[&str]) -> ParseResult<()> {
        let [path] = args else {
            return Err(self.syntax(format!("expected 1 texture path, found {} values", args.len())));
        };

        let texture = self.textures.load(path).map_err(|source| ParseError::Texture {
            line: self.line,
            source,
        })?;
        self.texture = Some(texture);
        Ok(())
    }

    fn parse_sphere(&mut self, args: &[&str]) -> ParseResult<()> {
        let [x, y, z, radius] = self.numbers::<f32, 4>(args)?;
        let material = self.current_material("sphere")?;

        let mut sphere = Sphere::new(Vec3::new(x, y, z), radius, material)
            .map_err(|e| self.scene_error(e.into()))?;
        // A texture applies to the next sphere only
        if let Some(texture) = self.texture.take() {
            sphere = sphere.with_texture(texture);
        }

        self.builder.add_object(sphere);
        Ok(())
    }

    fn parse_light(&mut self, args: &[&str]) -> ParseResult<()> {
        let [x, y, z, w, r, g, b] = args else {
            return Err(self.syntax(format!("expected 7 values, found {}", args.len())));
        };
        let position = Vec3::new(self.number(x)?, self.number(y)?, self.number(z)?);
        let kind: i32 = self.number(w)?;
        let color = Vec3::new(self.number(r)?, self.number(g)?, self.number(b)?);

        match kind {
            1 => {
                let light = PointLight::new(position, color).map_err(|e| self.scene_error(e))?;
                self.builder.add_light(light);
            }
            0 => {
                let light =
                    DirectionalLight::new(position, color).map_err(|e| self.scene_error(e))?;
                self.builder.add_light(light);
            }
            other => {
                return Err(self.syntax(format!(
                    "light type must be 1 (point) or 0 (directional), found {}",
                    other
                )))
            }
        }

        Ok(())
    }

    fn parse_face(&mut self, args: &[&str]) -> ParseResult<()> {
        let [a, b, c] = args else {
            return Err(self.syntax(format!("expected 3 face corners, found {}", args.len())));
        };

        let (form, first) = self.parse_corner(a)?;
        let mut corners = [first; 3];
        for (slot, token) in corners.iter_mut().skip(1).zip([b, c]) {
            let (corner_form, corner) = self.parse_corner(token)?;
            if corner_form != form {
                return Err(self.syntax("face corners must all use the same format"));
            }
            *slot = corner;
        }

        let material = self.current_material("face")?;
        self.builder
            .add_triangle(corners, material, self.texture.clone())
            .map_err(|e| self.scene_error(e))
    }

    /// Parse one `v[/vt][/vn]` corner into 0-based indices.
    fn parse_corner(&self, token: &str) -> ParseResult<(CornerForm, FaceVertex)> {
        let parts: Vec<&str> = token.split('/').collect();

        let (form, corner) = match parts.as_slice() {
            [v] => (CornerForm::Vertex, FaceVertex::new(self.index(v)?)),
            [v, vt] => (
                CornerForm::VertexTexCoord,
                FaceVertex::new(self.index(v)?).with_tex_coord(self.index(vt)?),
            ),
            [v, "", vn] => (
                CornerForm::VertexNormal,
                FaceVertex::new(self.index(v)?).with_normal(self.index(vn)?),
            ),
            [v, vt, vn] => (
                CornerForm::VertexTexCoordNormal,
                FaceVertex::new(self.index(v)?)
                    .with_tex_coord(self.index(vt)?)
                    .with_normal(self.index(vn)?),
            ),
            _ => return Err(self.syntax(format!("malformed face corner '{}'", token))),
        };

        Ok((form, corner))
    }

    /// Convert a 1-based index token to 0-based.
    fn index(&self, token: &str) -> ParseResult<usize> {
        let index: usize = self.number(token)?;
        index
            .checked_sub(1)
            .ok_or_else(|| self.syntax("face indices start at 1"))
    }

    fn current_material(&self, what: &str) -> ParseResult<Material> {
        self.material
            .ok_or_else(|| self.syntax(format!("{} defined before any mtlcolor", what)))
    }

    fn vec3(&self, args: &[&str]) -> ParseResult<Vec3> {
        self.numbers::<f32, 3>(args).map(Vec3::from_array)
    }

    /// Parse exactly `N` numeric arguments.
    fn numbers<T: FromStr, const N: usize>(&self, args: &[&str]) -> ParseResult<[T; N]> {
        if args.len() != N {
            return Err(self.syntax(format!("expected {} values, found {}", N, args.len())));
        }

        let values = args
            .iter()
            .map(|token| self.number(token))
            .collect::<ParseResult<Vec<T>>>()?;

        values
            .try_into()
            .map_err(|_| self.syntax(format!("expected {} values", N)))
    }

    fn number<T: FromStr>(&self, token: &str) -> ParseResult<T> {
        token
            .parse()
            .map_err(|_| self.syntax(format!("invalid number '{}'", token)))
    }

    fn syntax(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    fn scene_error(&self, source: SceneError) -> ParseError {
        ParseError::Scene {
            line: self.line,
            source,
        }
    }
}
