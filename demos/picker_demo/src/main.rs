//! Headless host for three segmented pickers.
//!
//! The host owns every selection, renders frames against a simulated clock
//! and plays a scripted sequence of taps. Run with `RUST_LOG=debug` to see
//! relayouts and policy decisions.

use std::cell::Cell;
use std::rc::Rc;

use segmented_core::*;
use segmented_ui::picker::{self, Action, CustomPolicy, SegmentedPicker, SelectionStyle};
use segmented_ui::{Box, Column, Text, TextStyle, ViewExt, layout_and_paint};
use web_time::{Duration, Instant};

const WIDTH: u32 = 480;
const HEIGHT: u32 = 240;
const FRAME: Duration = Duration::from_millis(16);
/// Upper bound on frames rendered while waiting for animations to finish.
const MAX_FRAMES: usize = 120;

const FILTERS: [&str; 4] = ["All", "Unread", "Flagged", "Archived"];
const RANGES: [&str; 3] = ["Day", "Week", "Month"];
const SORTS: [&str; 3] = ["Date", "Sender", "Size"];

#[derive(Clone, Copy, Debug)]
enum Target {
    Filter,
    Range,
    Sort,
}

impl Target {
    /// Index of the picker's first segment among the frame's hit regions.
    fn first_region(self) -> usize {
        match self {
            Target::Filter => 0,
            Target::Range => FILTERS.len(),
            Target::Sort => FILTERS.len() + RANGES.len(),
        }
    }
}

enum Step {
    Tap(Target, usize),
    ClearSortPolicy,
}

const SCRIPT: &[Step] = &[
    Step::Tap(Target::Filter, 1),
    Step::Tap(Target::Filter, 1),
    Step::Tap(Target::Filter, 3),
    Step::Tap(Target::Range, 2),
    Step::Tap(Target::Range, 2),
    Step::Tap(Target::Sort, 0),
    Step::Tap(Target::Sort, 0),
    Step::ClearSortPolicy,
    Step::Tap(Target::Sort, 1),
    Step::Tap(Target::Sort, 1),
];

/// Animation clock advanced by the host one frame at a time.
#[derive(Clone)]
struct FrameClock(Rc<Cell<Instant>>);

impl FrameClock {
    fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    fn tick(&self) {
        self.0.set(self.0.get() + FRAME);
    }
}

impl Clock for FrameClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

struct App {
    filter: Signal<Option<usize>>,
    range: Signal<Option<usize>>,
    sort: Signal<Option<usize>>,
    sort_policy: CustomPolicy,
}

impl App {
    fn new() -> Self {
        // Tapping the active sort key moves on to the next one.
        let sort_policy = CustomPolicy::with(|index, current| {
            if current == Some(index) {
                Some((index + 1) % SORTS.len())
            } else {
                Some(index)
            }
        });
        Self {
            filter: signal(None),
            range: signal(Some(0)),
            sort: signal(Some(0)),
            sort_policy,
        }
    }

    fn view(&self) -> View {
        let filter = Binding::from_signal(&self.filter);
        let range = Binding::from_signal(&self.range);
        let sort = Binding::from_signal(&self.sort);

        Column(Modifier::new().fill_max_size().padding(16.0)).child((
            Text("Inbox").size(20.0),
            SegmentedPicker::new(
                FILTERS.to_vec(),
                filter.clone(),
                Action::Toggle.bind(filter),
                |title: &&str, selected| title_text(title, selected),
            )
            .key("filter")
            .view(),
            SegmentedPicker::new(
                RANGES.to_vec(),
                range.clone(),
                Action::Normal.bind(range),
                |title: &&str, selected| title_text(title, selected),
            )
            .key("range")
            .height(36.0)
            .style(SelectionStyle::Capsule)
            .view(),
            SegmentedPicker::new(
                SORTS.to_vec(),
                sort.clone(),
                Action::Custom(self.sort_policy.clone()).bind(sort),
                |title: &&str, selected| title_text(title, selected),
            )
            .key("sort")
            .style(SelectionStyle::Underlined)
            .alignment(VerticalAlignment::Bottom)
            .decoration(|| {
                Some(Box(Modifier::new()
                    .fill_max_size()
                    .background(theme().highlight.with_alpha(40))
                    .clip_rounded(6.0)))
            })
            .view(),
        ))
    }

    fn log_state(&self) {
        let name = |titles: &[&'static str], s: Option<usize>| {
            s.and_then(|i| titles.get(i).copied()).unwrap_or("-")
        };
        log::info!(
            "filter={} range={} sort={}",
            name(&FILTERS, self.filter.get()),
            name(&RANGES, self.range.get()),
            name(&SORTS, self.sort.get()),
        );
    }
}

fn title_text(title: &str, selected: bool) -> View {
    let th = theme();
    Text(title).color(if selected { th.accent } else { th.on_surface })
}

/// Renders frames until no animation is running.
fn settle(sched: &mut Scheduler, app: &App, clock: &FrameClock) -> anyhow::Result<Frame> {
    let mut rendered = 0;
    loop {
        let frame = sched.compose(|_| app.view(), layout_and_paint)?;
        rendered += 1;
        if !frame.needs_redraw || rendered >= MAX_FRAMES {
            log::debug!(
                "settled after {rendered} frames ({} layout passes in the last one)",
                frame.passes
            );
            return Ok(frame);
        }
        clock.tick();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let clock = FrameClock::new();
    set_clock(clock.clone());

    let app = App::new();
    let watched = app.filter.clone();
    let watch = app
        .filter
        .subscribe(move |_| log::debug!("filter observer sees {:?}", watched.get()));
    let mut sched = Scheduler::with_size(WIDTH, HEIGHT);

    let mut frame = settle(&mut sched, &app, &clock)?;
    log::info!(
        "first frame: {} scene nodes, {} tap targets",
        frame.scene.nodes.len(),
        frame.hit_regions.len()
    );
    app.log_state();

    for step in SCRIPT {
        match *step {
            Step::Tap(target, index) => {
                let region = frame
                    .hit_regions
                    .get(target.first_region() + index)
                    .ok_or_else(|| anyhow::anyhow!("no segment {index} in {target:?}"))?;
                log::info!("tap {target:?} segment {index}");
                frame.tap(region.rect.center());
            }
            Step::ClearSortPolicy => {
                log::info!("sort policy cleared, falling back to toggle");
                app.sort_policy.clear();
            }
        }
        frame = settle(&mut sched, &app, &clock)?;
        app.log_state();
    }

    let selected: Vec<_> = frame
        .semantics_nodes
        .iter()
        .filter(|n| n.role == Role::Tab && n.selected)
        .map(|n| n.rect)
        .collect();
    log::info!("selected tabs on screen: {selected:?}");

    app.filter.unsubscribe(watch);
    for key in ["filter", "range", "sort"] {
        log::info!("released '{key}': {} slots", picker::release(key));
    }
    reset_clock();
    Ok(())
}
