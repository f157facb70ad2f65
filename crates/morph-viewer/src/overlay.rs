//! Status text drawn over the scene.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use morph_targets::WeightState;

use crate::input::Demo;
use crate::loader::LoadedScene;

const HELP: &str = "Q-W change Pose Arrows to swap weights";

/// Plugin drawing the active shape and its weight.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, draw_overlay);
    }
}

/// Line describing the active blend shape.
#[must_use]
pub fn status_line(names: &[String], weights: &WeightState) -> String {
    let index = weights.active_index();
    match (names.get(index), weights.active_weight()) {
        (Some(name), Some(weight)) => format!("Current Mesh {name} value {weight:.2}"),
        _ => "No blend shapes".to_owned(),
    }
}

#[allow(clippy::needless_pass_by_value)]
fn draw_overlay(mut contexts: EguiContexts, demo: Res<Demo>, scene: Res<LoadedScene>) -> Result {
    let ctx = contexts.ctx_mut()?;
    let status = status_line(&scene.shape_names, &demo.weights);

    egui::Area::new(egui::Id::new("morph_status"))
        .fixed_pos(egui::pos2(10.0, 10.0))
        .interactable(false)
        .show(ctx, |ui| {
            for line in [status.as_str(), HELP] {
                ui.label(
                    egui::RichText::new(line)
                        .color(egui::Color32::WHITE)
                        .size(16.0),
                );
            }
        });
    Ok(())
}

#[cfg(test)]
mod tests {
    use morph_targets::Direction;

    use super::*;

    #[test]
    fn status_names_active_shape_and_weight() {
        let names = vec!["smile".to_owned(), "frown".to_owned()];
        let mut weights = WeightState::new(2);
        weights.change_active_weight(Direction::Up);
        for _ in 0..3 {
            weights.change_weight(Direction::Up);
        }
        assert_eq!(status_line(&names, &weights), "Current Mesh frown value 0.15");
    }

    #[test]
    fn status_without_shapes() {
        assert_eq!(status_line(&[], &WeightState::new(0)), "No blend shapes");
    }
}
