//! Canvas painting for the effect layers.
//!
//! Both layers clear and repaint their whole canvas each frame. Glows are
//! radial gradients filled into a circle of the gradient's outer radius.

use std::f64::consts::TAU;

use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use super::error::Result;
use super::particles::ParticleField;
use super::spotlight::{Glow, GlowKind};
use super::theme::{Color, Palette, SpotlightStyle};

/// Paints the spotlight layer: trail glows back to front, then the main glow.
pub fn paint_spotlight(
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	glows: &[Glow],
	style: &SpotlightStyle,
) -> Result<()> {
	ctx.clear_rect(0.0, 0.0, width, height);

	for glow in glows {
		if glow.intensity <= 0.0 || glow.radius <= 0.0 {
			continue;
		}
		match glow.kind {
			GlowKind::Main => draw_main_glow(ctx, glow, style)?,
			GlowKind::Trail => draw_trail_glow(ctx, glow, style)?,
		}
	}
	Ok(())
}

fn draw_main_glow(
	ctx: &CanvasRenderingContext2d,
	glow: &Glow,
	style: &SpotlightStyle,
) -> Result<()> {
	let gradient = ctx.create_radial_gradient(glow.x, glow.y, 0.0, glow.x, glow.y, glow.radius)?;
	for (offset, alpha) in style.stops {
		let stop = style.color.with_alpha(alpha * glow.intensity);
		gradient.add_color_stop(offset as f32, &stop.to_css())?;
	}
	gradient.add_color_stop(style.fade_at as f32, &style.color.with_alpha(0.0).to_css())?;
	fill_circle(ctx, &gradient, glow.x, glow.y, glow.radius)
}

fn draw_trail_glow(
	ctx: &CanvasRenderingContext2d,
	glow: &Glow,
	style: &SpotlightStyle,
) -> Result<()> {
	// Older points drift towards the secondary tint.
	let color = style.color.lerp(style.color_secondary, 1.0 - glow.age_t);
	let gradient = ctx.create_radial_gradient(glow.x, glow.y, 0.0, glow.x, glow.y, glow.radius)?;
	gradient.add_color_stop(0.0, &color.with_alpha(0.3 * glow.intensity).to_css())?;
	gradient.add_color_stop(0.4, &color.with_alpha(0.18 * glow.intensity).to_css())?;
	gradient.add_color_stop(0.7, &color.with_alpha(0.0).to_css())?;
	fill_circle(ctx, &gradient, glow.x, glow.y, glow.radius)
}

/// Paints every particle as a soft halo with a brighter core.
pub fn paint_particles(
	ctx: &CanvasRenderingContext2d,
	field: &ParticleField,
	palette: &Palette,
) -> Result<()> {
	let (width, height) = field.bounds();
	ctx.clear_rect(0.0, 0.0, width, height);

	for p in &field.particles {
		let alpha = p.pulsed_opacity();
		let color = palette.get(p.color);
		let halo = p.size * 3.0;

		let gradient = ctx.create_radial_gradient(p.x, p.y, 0.0, p.x, p.y, halo)?;
		gradient.add_color_stop(0.0, &color.with_alpha(alpha).to_css())?;
		gradient.add_color_stop(0.4, &color.with_alpha(alpha * 0.2).to_css())?;
		gradient.add_color_stop(1.0, &color.with_alpha(0.0).to_css())?;
		fill_circle(ctx, &gradient, p.x, p.y, halo)?;

		fill_core(ctx, color.with_alpha(alpha * 1.5), p.x, p.y, p.size)?;
	}
	Ok(())
}

fn fill_circle(
	ctx: &CanvasRenderingContext2d,
	gradient: &CanvasGradient,
	x: f64,
	y: f64,
	radius: f64,
) -> Result<()> {
	ctx.begin_path();
	ctx.arc(x, y, radius, 0.0, TAU)?;
	#[allow(deprecated)]
	ctx.set_fill_style(gradient);
	ctx.fill();
	Ok(())
}

fn fill_core(
	ctx: &CanvasRenderingContext2d,
	color: Color,
	x: f64,
	y: f64,
	radius: f64,
) -> Result<()> {
	ctx.begin_path();
	ctx.arc(x, y, radius, 0.0, TAU)?;
	ctx.set_fill_style_str(&color.to_css());
	ctx.fill();
	Ok(())
}
