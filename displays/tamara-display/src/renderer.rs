//! Screen renderer
//!
//! Turns a [`RedrawPlan`] and a [`View`] snapshot into drawing commands.
//! A screen entry repaints the center area; everything else repaints only
//! the sub-regions the plan names.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;
use tamara_core::controller::FiringView;
use tamara_core::layout::{self, Rect, SCREEN_HEIGHT, SCREEN_WIDTH};
use tamara_core::state::Screen;
use tamara_core::traits::Channel;
use tamara_core::{RedrawPlan, View};

use crate::backend::{DisplayBackend, DisplayError};
use crate::color::{self, ChargeStatus};
use crate::command::{Anchor, CommandList, DrawCommand, TextSize, TEXT_LEN};

/// Title shown on every screen
pub const TITLE: &str = "TAMARA [ ITD ]";

/// Firmware version shown bottom-left
pub const VERSION: &str = "ITD-V2.0.1";

/// Splash logo text
pub const SPLASH_TEXT: &str = "LUNAR";

/// Rejected-touch indicator, top-right corner
const REJECT_X: i32 = SCREEN_WIDTH - 20;
const REJECT_Y: i32 = 20;
const REJECT_RADIUS: u32 = 8;

fn push(list: &mut CommandList, command: DrawCommand) -> Result<(), DisplayError> {
    list.push(command).map_err(|_| DisplayError::BufferOverflow)
}

fn fill(
    list: &mut CommandList,
    rect: Rect,
    radius: u32,
    color: Rgb565,
) -> Result<(), DisplayError> {
    push(list, DrawCommand::FillRoundRect { rect, radius, color })
}

fn text(
    list: &mut CommandList,
    content: &str,
    x: i32,
    y: i32,
    anchor: Anchor,
    size: TextSize,
    color: Rgb565,
) -> Result<(), DisplayError> {
    let mut buf: String<TEXT_LEN> = String::new();
    buf.push_str(content)
        .map_err(|_| DisplayError::BufferOverflow)?;
    push(
        list,
        DrawCommand::Text {
            text: buf,
            x,
            y,
            anchor,
            size,
            color,
        },
    )
}

fn format_text(args: core::fmt::Arguments<'_>) -> Result<String<TEXT_LEN>, DisplayError> {
    let mut buf = String::new();
    buf.write_fmt(args)
        .map_err(|_| DisplayError::BufferOverflow)?;
    Ok(buf)
}

/// Screen renderer
///
/// Holds only what the controller does not: the Home status tiles and
/// whether the rejected-touch indicator is currently lit.
#[derive(Debug, Clone)]
pub struct Renderer {
    statuses: [ChargeStatus; layout::STATUS_TILE_COUNT],
    flash_lit: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer with every station reported charged
    pub fn new() -> Self {
        Self {
            statuses: [ChargeStatus::Charged; layout::STATUS_TILE_COUNT],
            flash_lit: false,
        }
    }

    /// Set the status of one Home tile
    ///
    /// Out-of-range indices are ignored. Takes effect on the next Home
    /// entry.
    pub fn set_status(&mut self, index: usize, status: ChargeStatus) {
        if let Some(slot) = self.statuses.get_mut(index) {
            *slot = status;
        }
    }

    /// Boot splash: white disc with the logo text
    pub fn splash() -> Result<CommandList, DisplayError> {
        let mut list = CommandList::new();
        let cx = SCREEN_WIDTH / 2;
        let cy = SCREEN_HEIGHT / 2;
        push(&mut list, DrawCommand::Clear(color::BLACK))?;
        push(
            &mut list,
            DrawCommand::FillCircle {
                x: cx,
                y: cy,
                radius: 80,
                color: color::WHITE,
            },
        )?;
        text(
            &mut list,
            SPLASH_TEXT,
            cx,
            cy,
            Anchor::MiddleCenter,
            TextSize::Large,
            color::BLACK,
        )?;
        Ok(list)
    }

    /// Persistent chrome: clears the whole screen, then title and version
    pub fn overlay() -> Result<CommandList, DisplayError> {
        let mut list = CommandList::new();
        push(&mut list, DrawCommand::Clear(color::BLACK))?;
        text(
            &mut list,
            TITLE,
            SCREEN_WIDTH / 2,
            layout::TITLE_Y,
            Anchor::TopCenter,
            TextSize::Large,
            color::WHITE,
        )?;
        text(
            &mut list,
            VERSION,
            4,
            SCREEN_HEIGHT - 3,
            Anchor::BottomLeft,
            TextSize::Small,
            color::DARKGREY,
        )?;
        Ok(list)
    }

    /// Build the commands for one tick
    pub fn render(
        &mut self,
        plan: &RedrawPlan,
        view: &View,
    ) -> Result<CommandList, DisplayError> {
        let mut list = CommandList::new();

        if let Some(screen) = plan.full {
            push(
                &mut list,
                DrawCommand::ClearRegion {
                    rect: layout::CENTER_CLEAR,
                    color: color::BLACK,
                },
            )?;
            match screen {
                Screen::Home => self.home(&mut list)?,
                Screen::DurationConfig => Self::duration_config(&mut list, view)?,
                Screen::Firing => Self::firing_frame(&mut list, view)?,
            }
        } else {
            if plan.output_selection {
                Self::output_chips(&mut list, view.selected_output)?;
            }
            if plan.duration_value {
                Self::duration_value(&mut list, view.duration_ms)?;
            }
        }

        if plan.firing_progress {
            if let Some(firing) = view.firing {
                Self::firing_progress(&mut list, &firing)?;
            }
        }

        if plan.rejected_flash {
            push(
                &mut list,
                DrawCommand::FillCircle {
                    x: REJECT_X,
                    y: REJECT_Y,
                    radius: REJECT_RADIUS,
                    color: color::RED,
                },
            )?;
            self.flash_lit = true;
        } else if self.flash_lit {
            push(
                &mut list,
                DrawCommand::FillCircle {
                    x: REJECT_X,
                    y: REJECT_Y,
                    radius: REJECT_RADIUS,
                    color: color::BLACK,
                },
            )?;
            self.flash_lit = false;
        }

        Ok(list)
    }

    /// Render and execute on a backend
    pub fn draw<B: DisplayBackend>(
        &mut self,
        backend: &mut B,
        plan: &RedrawPlan,
        view: &View,
    ) -> Result<(), DisplayError> {
        let list = self.render(plan, view)?;
        if list.is_empty() {
            return Ok(());
        }
        backend.execute_all(&list)
    }

    fn home(&self, list: &mut CommandList) -> Result<(), DisplayError> {
        fill(list, layout::CENTER_PANEL, 15, color::PANEL)?;
        fill(list, layout::CONFIGURE_BUTTON, 15, color::GO_GREEN)?;
        text(
            list,
            "CONFIGURE",
            layout::CONFIGURE_BUTTON.center_x(),
            layout::CONFIGURE_BUTTON.center_y(),
            Anchor::MiddleCenter,
            TextSize::Medium,
            color::WHITE,
        )?;

        for (i, status) in self.statuses.iter().enumerate() {
            let tile = layout::status_tile(i);
            fill(list, tile, 10, status.color())?;
            push(
                list,
                DrawCommand::FillCircle {
                    x: tile.center_x(),
                    y: tile.center_y(),
                    radius: (layout::STATUS_TILE_SIZE / 3) as u32,
                    color: color::WHITE,
                },
            )?;
        }
        Ok(())
    }

    fn duration_config(list: &mut CommandList, view: &View) -> Result<(), DisplayError> {
        fill(list, layout::CENTER_PANEL, 15, color::PANEL)?;

        for (button, label, fill_color) in [
            (layout::MINUS_BUTTON, "-", color::RED),
            (layout::PLUS_BUTTON, "+", color::GO_GREEN),
        ] {
            fill(list, button, 15, fill_color)?;
            text(
                list,
                label,
                button.center_x(),
                button.center_y(),
                Anchor::MiddleCenter,
                TextSize::Large,
                color::WHITE,
            )?;
        }

        text(
            list,
            "FIRING DURATION",
            SCREEN_WIDTH / 2,
            70,
            Anchor::TopCenter,
            TextSize::Small,
            color::LABEL_GREY,
        )?;
        Self::duration_value(list, view.duration_ms)?;
        text(
            list,
            "ms",
            SCREEN_WIDTH - 100,
            180,
            Anchor::TopCenter,
            TextSize::Large,
            color::UNIT_GREY,
        )?;

        Self::output_chips(list, view.selected_output)?;

        fill(list, layout::FIRE_BUTTON, 8, color::ORANGE)?;
        text(
            list,
            "FIRE",
            layout::FIRE_BUTTON.center_x(),
            layout::FIRE_BUTTON.center_y(),
            Anchor::MiddleCenter,
            TextSize::Medium,
            color::WHITE,
        )
    }

    fn duration_value(list: &mut CommandList, duration_ms: u32) -> Result<(), DisplayError> {
        push(
            list,
            DrawCommand::ClearRegion {
                rect: layout::DURATION_VALUE_AREA,
                color: color::PANEL,
            },
        )?;
        push(
            list,
            DrawCommand::Text {
                text: format_text(format_args!("{}", duration_ms))?,
                x: SCREEN_WIDTH / 2,
                y: layout::DURATION_VALUE_Y,
                anchor: Anchor::TopCenter,
                size: TextSize::Huge,
                color: color::WHITE,
            },
        )
    }

    fn output_chips(list: &mut CommandList, selected: Channel) -> Result<(), DisplayError> {
        for (channel, chip, label) in [
            (Channel::One, layout::OUTPUT1_CHIP, "OUT1"),
            (Channel::Two, layout::OUTPUT2_CHIP, "OUT2"),
        ] {
            let chip_color = if channel == selected {
                color::GO_GREEN
            } else {
                color::IDLE_GREY
            };
            fill(list, chip, 11, chip_color)?;
            text(
                list,
                label,
                chip.center_x(),
                chip.center_y(),
                Anchor::MiddleCenter,
                TextSize::Medium,
                color::WHITE,
            )?;
        }
        Ok(())
    }

    fn firing_frame(list: &mut CommandList, view: &View) -> Result<(), DisplayError> {
        let frame = layout::FIRING_FRAME;
        fill(list, frame, 15, color::FRAME_GREY)?;
        fill(
            list,
            Rect::new(frame.x + 1, frame.y + 1, frame.width - 2, frame.height - 2),
            15,
            color::BLACK,
        )?;

        // The session may already be over if it ended on the entry tick
        let channel = view
            .firing
            .map(|f| f.channel)
            .unwrap_or(view.selected_output);
        push(
            list,
            DrawCommand::Text {
                text: format_text(format_args!("FIRING OUTPUT {}", channel.number()))?,
                x: SCREEN_WIDTH / 2,
                y: layout::FIRING_TITLE_Y,
                anchor: Anchor::TopCenter,
                size: TextSize::Large,
                color: color::WHITE,
            },
        )
    }

    fn firing_progress(list: &mut CommandList, firing: &FiringView) -> Result<(), DisplayError> {
        fill(list, layout::PROGRESS_TRACK, 8, color::IDLE_GREY)?;

        let full = layout::PROGRESS_FILL;
        let width = (firing.progress.clamp(0.0, 1.0) * full.width as f32) as i32;
        if width > 0 {
            fill(
                list,
                Rect::new(full.x, full.y, width, full.height),
                8,
                color::ORANGE,
            )?;
        }

        push(
            list,
            DrawCommand::Text {
                text: format_text(format_args!("{} ms", firing.remaining_ms))?,
                x: SCREEN_WIDTH / 2,
                y: layout::REMAINING_Y,
                anchor: Anchor::TopCenter,
                size: TextSize::Medium,
                color: color::WHITE,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::tests::SampleTarget;
    use crate::graphics::GraphicsBackend;
    use embedded_graphics::prelude::Point;

    fn view(screen: Screen) -> View {
        View {
            screen,
            duration_ms: 1000,
            selected_output: Channel::One,
            firing: None,
        }
    }

    fn full(screen: Screen) -> RedrawPlan {
        RedrawPlan {
            full: Some(screen),
            ..Default::default()
        }
    }

    fn texts(list: &CommandList) -> impl Iterator<Item = &str> {
        list.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn fill_color(list: &CommandList, rect: Rect) -> Option<Rgb565> {
        list.iter().find_map(|c| match c {
            DrawCommand::FillRoundRect { rect: r, color, .. } if *r == rect => Some(*color),
            _ => None,
        })
    }

    #[test]
    fn test_splash_and_overlay() {
        let splash = Renderer::splash().unwrap();
        assert_eq!(splash[0], DrawCommand::Clear(color::BLACK));
        assert!(texts(&splash).eq([SPLASH_TEXT]));

        let overlay = Renderer::overlay().unwrap();
        assert!(texts(&overlay).eq([TITLE, VERSION]));
        assert!(overlay.iter().any(|c| matches!(
            c,
            DrawCommand::Text { anchor: Anchor::BottomLeft, color, .. } if *color == color::DARKGREY
        )));
    }

    #[test]
    fn test_empty_plan_draws_nothing() {
        let mut renderer = Renderer::new();
        let list = renderer
            .render(&RedrawPlan::default(), &view(Screen::Home))
            .unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_home_tiles() {
        let mut renderer = Renderer::new();
        renderer.set_status(3, ChargeStatus::Armed);
        renderer.set_status(99, ChargeStatus::Armed);

        let list = renderer
            .render(&full(Screen::Home), &view(Screen::Home))
            .unwrap();
        assert!(texts(&list).any(|t| t == "CONFIGURE"));
        assert_eq!(
            fill_color(&list, layout::status_tile(0)),
            Some(ChargeStatus::Charged.color())
        );
        assert_eq!(
            fill_color(&list, layout::status_tile(3)),
            Some(ChargeStatus::Armed.color())
        );
        assert_eq!(
            fill_color(&list, layout::CONFIGURE_BUTTON),
            Some(color::GO_GREEN)
        );
    }

    #[test]
    fn test_config_screen() {
        let mut renderer = Renderer::new();
        let mut v = view(Screen::DurationConfig);
        v.selected_output = Channel::Two;

        let list = renderer.render(&full(Screen::DurationConfig), &v).unwrap();
        assert_eq!(
            list[0],
            DrawCommand::ClearRegion {
                rect: layout::CENTER_CLEAR,
                color: color::BLACK
            }
        );
        for label in ["-", "+", "FIRING DURATION", "1000", "ms", "OUT1", "OUT2", "FIRE"] {
            assert!(texts(&list).any(|t| t == label), "missing {}", label);
        }
        assert_eq!(fill_color(&list, layout::OUTPUT1_CHIP), Some(color::IDLE_GREY));
        assert_eq!(fill_color(&list, layout::OUTPUT2_CHIP), Some(color::GO_GREEN));
        assert_eq!(fill_color(&list, layout::MINUS_BUTTON), Some(color::RED));
        assert_eq!(fill_color(&list, layout::FIRE_BUTTON), Some(color::ORANGE));
    }

    #[test]
    fn test_value_only_redraw() {
        let mut renderer = Renderer::new();
        let mut v = view(Screen::DurationConfig);
        v.duration_ms = 1300;

        let plan = RedrawPlan {
            duration_value: true,
            ..Default::default()
        };
        let list = renderer.render(&plan, &v).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(
            list[0],
            DrawCommand::ClearRegion {
                rect: layout::DURATION_VALUE_AREA,
                color: color::PANEL
            }
        );
        assert!(texts(&list).eq(["1300"]));
    }

    #[test]
    fn test_firing_progress() {
        let mut renderer = Renderer::new();
        let mut v = view(Screen::Firing);
        v.selected_output = Channel::Two;
        v.firing = Some(FiringView {
            channel: Channel::Two,
            remaining_ms: 750,
            progress: 0.25,
        });

        let plan = RedrawPlan {
            full: Some(Screen::Firing),
            firing_progress: true,
            ..Default::default()
        };
        let list = renderer.render(&plan, &v).unwrap();
        assert!(texts(&list).eq(["FIRING OUTPUT 2", "750 ms"]));

        let bar = layout::PROGRESS_FILL;
        let quarter = Rect::new(bar.x, bar.y, bar.width / 4, bar.height);
        assert_eq!(fill_color(&list, quarter), Some(color::ORANGE));
    }

    #[test]
    fn test_zero_progress_has_no_fill() {
        let mut renderer = Renderer::new();
        let mut v = view(Screen::Firing);
        v.firing = Some(FiringView {
            channel: Channel::One,
            remaining_ms: 1000,
            progress: 0.0,
        });
        let plan = RedrawPlan {
            firing_progress: true,
            ..Default::default()
        };
        let list = renderer.render(&plan, &v).unwrap();
        assert!(!list
            .iter()
            .any(|c| matches!(c, DrawCommand::FillRoundRect { color, .. } if *color == color::ORANGE)));
    }

    #[test]
    fn test_rejected_flash_cleared_next_render() {
        let mut renderer = Renderer::new();
        let v = view(Screen::Home);
        let flash = RedrawPlan {
            rejected_flash: true,
            ..Default::default()
        };

        let lit = renderer.render(&flash, &v).unwrap();
        assert!(matches!(
            lit[0],
            DrawCommand::FillCircle { color, .. } if color == color::RED
        ));

        let cleared = renderer.render(&RedrawPlan::default(), &v).unwrap();
        assert!(matches!(
            cleared[0],
            DrawCommand::FillCircle { color, .. } if color == color::BLACK
        ));

        assert!(renderer
            .render(&RedrawPlan::default(), &v)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_every_screen_fits() {
        let mut renderer = Renderer::new();
        let firing = FiringView {
            channel: Channel::One,
            remaining_ms: 10_000,
            progress: 1.0,
        };
        for screen in [Screen::Home, Screen::DurationConfig, Screen::Firing] {
            let mut v = view(screen);
            v.duration_ms = 10_000;
            v.firing = Some(firing);
            let plan = RedrawPlan {
                full: Some(screen),
                output_selection: true,
                duration_value: true,
                firing_progress: true,
                rejected_flash: true,
            };
            assert!(renderer.render(&plan, &v).is_ok());
        }
    }

    #[test]
    fn test_draw_on_backend() {
        let mut renderer = Renderer::new();
        let mut backend = GraphicsBackend::new(SampleTarget::new([
            Point::new(layout::FIRE_BUTTON.center_x() + 30, layout::FIRE_BUTTON.y + 3),
            Point::new(0, 60),
            Point::new(0, 0),
            Point::new(479, 319),
        ]));

        renderer
            .draw(
                &mut backend,
                &full(Screen::DurationConfig),
                &view(Screen::DurationConfig),
            )
            .unwrap();

        let target = backend.target();
        assert_eq!(target.sample(0), Some(color::ORANGE));
        assert_eq!(target.sample(1), Some(color::BLACK));
        // Title band untouched
        assert_eq!(target.sample(2), None);
    }
}
