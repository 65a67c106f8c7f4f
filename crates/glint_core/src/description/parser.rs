//! Scene description text parser.
//!
//! The format is a flat stream of whitespace-separated tokens; line breaks
//! and blank lines only matter for error reporting.
//!
//! ```text
//! near far fovY aspect
//! recursionLevel
//! pixelSize
//! tileWidth
//! floorKa floorKd floorKr
//! objectCount
//! sphere  cx cy cz radius        r g b  ka kd ks kr  shininess
//! cube    x y z side             r g b  ka kd ks kr  shininess
//! pyramid x y z width height     r g b  ka kd ks kr  shininess
//! pointLightCount
//! px py pz  r g b  falloff
//! spotLightCount
//! px py pz  r g b  falloff  lookX lookY lookZ  cutoffDegrees
//! ```

use std::collections::VecDeque;

use glint_math::DVec3;
use thiserror::Error;

use super::types::*;

/// Errors that can occur while parsing a scene description.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unexpected end of input, expected {0}")]
    UnexpectedEof(String),

    #[error("Invalid number at line {line}: '{token}' ({expected})")]
    InvalidNumber {
        line: usize,
        token: String,
        expected: String,
    },

    #[error("Unknown object '{keyword}' at line {line}")]
    UnknownObject { line: usize, keyword: String },

    #[error("Unexpected trailing input '{token}' at line {line}")]
    TrailingInput { line: usize, token: String },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Token-stream parser for scene descriptions.
pub struct DescriptionParser {
    tokens: VecDeque<(usize, String)>,
    current_line: usize,
}

impl DescriptionParser {
    /// Create a new parser from file contents.
    pub fn new(content: &str) -> Self {
        let tokens = content
            .lines()
            .enumerate()
            .flat_map(|(i, line)| {
                line.split_whitespace()
                    .map(move |token| (i + 1, token.to_string()))
            })
            .collect();

        Self {
            tokens,
            current_line: 1,
        }
    }

    /// Parse the whole description.
    pub fn parse(&mut self) -> ParseResult<SceneDescription> {
        let lens = self.parse_lens()?;
        let recursion_depth = self.next_u32("recursion level")?;

        let pixel_size = self.next_u32("pixel size")?;
        if pixel_size == 0 || pixel_size > MAX_PIXEL_SIZE {
            return Err(self.error(format!(
                "pixel size must be between 1 and {MAX_PIXEL_SIZE}, got {pixel_size}"
            )));
        }

        let floor = FloorDesc {
            tile_width: self.next_positive("checkerboard tile width")?,
            ambient: self.next_non_negative("floor ambient coefficient")?,
            diffuse: self.next_non_negative("floor diffuse coefficient")?,
            reflection: self.next_non_negative("floor reflection coefficient")?,
        };

        let object_count = self.next_u32("object count")?;
        let mut objects = Vec::new();
        for _ in 0..object_count {
            objects.push(self.parse_object()?);
        }

        let light_count = self.next_u32("point light count")?;
        let mut point_lights = Vec::new();
        for _ in 0..light_count {
            point_lights.push(self.parse_point_light()?);
        }

        let spot_count = self.next_u32("spotlight count")?;
        let mut spot_lights = Vec::new();
        for _ in 0..spot_count {
            spot_lights.push(self.parse_spot_light()?);
        }

        if let Some((line, token)) = self.tokens.pop_front() {
            return Err(ParseError::TrailingInput { line, token });
        }

        Ok(SceneDescription {
            lens,
            recursion_depth,
            pixel_size,
            floor,
            objects,
            point_lights,
            spot_lights,
        })
    }

    fn parse_lens(&mut self) -> ParseResult<LensDesc> {
        let near = self.next_positive("near plane")?;
        let far = self.next_f64("far plane")?;
        if far <= near {
            return Err(self.error(format!("far plane {far} must lie beyond near plane {near}")));
        }

        let fov_y = self.next_positive("field of view")?;
        if fov_y >= 180.0 {
            return Err(self.error(format!("field of view {fov_y} must be below 180 degrees")));
        }

        let aspect_ratio = self.next_positive("aspect ratio")?;

        Ok(LensDesc {
            near,
            far,
            fov_y,
            aspect_ratio,
        })
    }

    fn parse_object(&mut self) -> ParseResult<ObjectDesc> {
        let (line, keyword) = self.next_token("object keyword")?;

        let object = match keyword.as_str() {
            "sphere" => ObjectDesc::Sphere {
                center: self.next_vec3("sphere center")?,
                radius: self.next_positive("sphere radius")?,
                surface: self.parse_surface()?,
            },
            "cube" => ObjectDesc::Cube {
                origin: self.next_vec3("cube corner")?,
                side: self.next_positive("cube side")?,
                surface: self.parse_surface()?,
            },
            "pyramid" => ObjectDesc::Pyramid {
                origin: self.next_vec3("pyramid corner")?,
                width: self.next_positive("pyramid width")?,
                height: self.next_positive("pyramid height")?,
                surface: self.parse_surface()?,
            },
            _ => {
                return Err(ParseError::UnknownObject {
                    line,
                    keyword: keyword.clone(),
                })
            }
        };

        log::debug!("Parsed {} at line {}", object.keyword(), line);
        Ok(object)
    }

    fn parse_surface(&mut self) -> ParseResult<SurfaceDesc> {
        let color = self.next_vec3("surface color")?;
        if !color.cmpge(DVec3::ZERO).all() || !color.cmple(DVec3::ONE).all() {
            return Err(self.error(format!("surface color {color} must lie within [0, 1]")));
        }

        let ambient = self.next_non_negative("ambient coefficient")?;
        let diffuse = self.next_non_negative("diffuse coefficient")?;
        let specular = self.next_non_negative("specular coefficient")?;
        let reflection = self.next_non_negative("reflection coefficient")?;
        // Shininess may be written as a float; the fractional part is dropped.
        let shininess = self.next_non_negative("shininess")?.trunc() as u32;

        Ok(SurfaceDesc {
            color,
            ambient,
            diffuse,
            specular,
            reflection,
            shininess,
        })
    }

    fn parse_point_light(&mut self) -> ParseResult<PointLightDesc> {
        let position = self.next_vec3("light position")?;
        let color = self.next_vec3("light color")?;
        if !color.cmpge(DVec3::ZERO).all() {
            return Err(self.error(format!("light color {color} must not be negative")));
        }
        let falloff = self.next_non_negative("light falloff")?;

        Ok(PointLightDesc {
            position,
            color,
            falloff,
        })
    }

    fn parse_spot_light(&mut self) -> ParseResult<SpotLightDesc> {
        let light = self.parse_point_light()?;
        let look_at = self.next_vec3("spotlight target")?;
        let cutoff_degrees = self.next_positive("spotlight cutoff angle")?;

        let direction = (look_at - light.position)
            .try_normalize()
            .ok_or_else(|| self.error("spotlight target coincides with its position"))?;

        Ok(SpotLightDesc {
            light,
            direction,
            cutoff_degrees,
        })
    }

    fn next_token(&mut self, expected: &str) -> ParseResult<(usize, String)> {
        match self.tokens.pop_front() {
            Some((line, token)) => {
                self.current_line = line;
                Ok((line, token))
            }
            None => Err(ParseError::UnexpectedEof(expected.to_string())),
        }
    }

    fn next_f64(&mut self, expected: &str) -> ParseResult<f64> {
        let (line, token) = self.next_token(expected)?;
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ParseError::InvalidNumber {
                line,
                token,
                expected: expected.to_string(),
            }),
        }
    }

    fn next_u32(&mut self, expected: &str) -> ParseResult<u32> {
        let (line, token) = self.next_token(expected)?;
        token.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
            line,
            token,
            expected: expected.to_string(),
        })
    }

    fn next_non_negative(&mut self, expected: &str) -> ParseResult<f64> {
        let value = self.next_f64(expected)?;
        if value < 0.0 {
            return Err(self.error(format!("{expected} must not be negative, got {value}")));
        }
        Ok(value)
    }

    fn next_positive(&mut self, expected: &str) -> ParseResult<f64> {
        let value = self.next_f64(expected)?;
        if value <= 0.0 {
            return Err(self.error(format!("{expected} must be positive, got {value}")));
        }
        Ok(value)
    }

    fn next_vec3(&mut self, expected: &str) -> ParseResult<DVec3> {
        Ok(DVec3::new(
            self.next_f64(expected)?,
            self.next_f64(expected)?,
            self.next_f64(expected)?,
        ))
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Parse {
            line: self.current_line,
            message: message.into(),
        }
    }
}

/// Parse a scene description from a string.
pub fn parse_description(content: &str) -> ParseResult<SceneDescription> {
    let mut parser = DescriptionParser::new(content);
    parser.parse()
}
