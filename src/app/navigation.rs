//! Zoom navigation for `AtlasApp`.
//!
//! A zoom retargets the two viewport scales so the target node's rectangle
//! fills the screen, animated over a fixed duration. The visible tile set
//! is swapped only when the transition settles, so exiting tiles animate
//! with their pre-transition geometry. A second zoom during an animation
//! cancels and retargets: the new transition starts from the currently
//! interpolated domains, so the viewport never jumps.

use std::time::Instant;

use eframe::egui;

use ordinaries::config::ZOOM_DURATION;
use ordinaries::nav::{self, Focus};

use super::AtlasApp;

/// An in-flight zoom between two scale-domain pairs.
pub struct ZoomTransition {
    pub from_x: (f64, f64),
    pub from_y: (f64, f64),
    pub to_x: (f64, f64),
    pub to_y: (f64, f64),
    pub target: Focus,
    pub start: Instant,
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn lerp_pair(a: (f64, f64), b: (f64, f64), t: f64) -> (f64, f64) {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

impl AtlasApp {
    /// Zoom the viewport to a node. Requests naming the current focus are
    /// no-ops; because focus is updated the moment a transition starts,
    /// that also covers "a transition to this exact node is already
    /// pending".
    pub fn zoom_to(&mut self, target: Focus) {
        if target == self.focus {
            return;
        }
        let to = nav::focus_rect(&self.tree, target);
        self.transition = Some(ZoomTransition {
            from_x: self.sx.domain,
            from_y: self.sy.domain,
            to_x: (to.x0, to.x1),
            to_y: (to.y0, to.y1),
            target,
            start: Instant::now(),
        });
        self.focus = target;
        if target == Focus::Root {
            self.close_panel();
        }
    }

    /// One step back to the top level, from any depth.
    pub fn go_back(&mut self) {
        self.zoom_to(Focus::Root);
    }

    /// Advance the in-flight transition, if any. Call once per frame
    /// before drawing.
    pub fn step_transition(&mut self, ctx: &egui::Context) {
        let Some(t) = &self.transition else {
            return;
        };
        let p = (t.start.elapsed().as_secs_f32() / ZOOM_DURATION).min(1.0);
        let e = ease_in_out(p) as f64;
        self.sx.set_domain(lerp_pair(t.from_x, t.to_x, e));
        self.sy.set_domain(lerp_pair(t.from_y, t.to_y, e));
        if p >= 1.0 {
            // Settled: only now recompute what is visible at this level.
            self.transition = None;
            self.visible = nav::visible_nodes(&self.tree, self.focus);
        } else {
            ctx.request_repaint();
        }
    }
}
