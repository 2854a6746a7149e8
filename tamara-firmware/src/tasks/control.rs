//! Control loop task
//!
//! Each tick samples the touch panel and the aux contact, advances the
//! state machine and redraws whatever the plan names. The state machine
//! owns the output stage, so cut-off never waits on the display.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};
use tamara_core::traits::TouchSource;
use tamara_core::ScreenStateMachine;
use tamara_display::Renderer;

use crate::board::{Display, OutputStage, Touch, BOARD};

/// Control task - the only place outputs are driven after bring-up
#[embassy_executor::task]
pub async fn control_task(
    outputs: OutputStage,
    mut touch: Touch,
    aux: Input<'static>,
    mut display: Display,
    mut renderer: Renderer,
) {
    let period_ms = BOARD.control.tick_period_ms as u32;
    info!("Control task started ({}ms tick)", period_ms);

    let mut machine = ScreenStateMachine::new(outputs, period_ms);
    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));
    let start = Instant::now();

    loop {
        ticker.next().await;

        let now_ms = start.elapsed().as_millis() as u32;
        let touch_point = touch.poll();
        let aux_pressed = aux.is_low();

        let plan = machine.tick(now_ms, touch_point, aux_pressed);
        if plan.is_empty() {
            continue;
        }

        let view = machine.view(now_ms);
        if let Err(e) = renderer.draw(&mut display, &plan, &view) {
            warn!("Redraw failed: {}", e);
        }
    }
}
