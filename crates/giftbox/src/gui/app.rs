use crate::audio;
use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::assets::Assets;
use crate::gui::motion::MotionSource;
use crate::gui::theme::{self, ThemeColors};
use crate::unbox::{self, BoxLayout, Controller, Input, Key, Outcome, Phase, Point, Snapshot};
use confetti::BurstGenerator;
use gtk::prelude::*;
use gtk4 as gtk;
use rand::SeedableRng;
use rand::rngs::StdRng;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub controller: Rc<RefCell<Controller>>,
    pub snapshot: Rc<RefCell<Snapshot>>,
    pub assets: Rc<RefCell<Assets>>,
    pub phase: Phase,
    pub config: Config,
    pub motion_source: MotionSource,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    /// Frame clock time of the previous tick, in microseconds.
    pub last_frame: Option<i64>,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(Point),
    Key(Key),
    Activate,
    Reset,
    Frame(i64),
    MotionChanged(bool),
    ConfigReload,
    Close,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Activate => AppMsg::Activate,
            AppEvent::Reset => AppMsg::Reset,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn map_key(key: gtk::gdk::Key) -> Key {
    match key {
        gtk::gdk::Key::Return | gtk::gdk::Key::KP_Enter => Key::Enter,
        gtk::gdk::Key::space => Key::Space,
        _ => Key::Other,
    }
}

fn build_controller(config: &Config, system_reduced: bool) -> Controller {
    Controller::new(
        audio::open_player(config.audio.enabled, config.audio.volume),
        Box::new(StdRng::from_entropy()),
    )
    .with_motion(config.motion.preference.resolve(system_reduced))
    .with_shake_period(config.shake.period())
    .with_generator(BurstGenerator::new(config.confetti.brand.clone()))
    .on_reset(|| log::debug!("Reset callback fired"))
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Gift Box"),
            set_default_size: (800, 600),
            add_css_class: "giftbox-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    match map_key(key) {
                        Key::Other => glib::Propagation::Proceed,
                        mapped => {
                            sender.input(AppMsg::Key(mapped));
                            glib::Propagation::Stop
                        }
                    }
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    set_focusable: true,
                    add_css_class: "giftbox-drawing-area",

                    add_controller = gtk::GestureClick {
                        set_button: gtk::gdk::BUTTON_PRIMARY,
                        connect_released[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::Pointer(Point::new(x, y)));
                        }
                    }
                },

                add_overlay = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 12,
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::End,
                    set_margin_bottom: 32,

                    gtk::Label {
                        add_css_class: "giftbox-hint",
                        set_label: "Click the gift or press Enter to open it",
                        #[watch]
                        set_visible: model.phase == Phase::Idle,
                    },

                    gtk::Label {
                        add_css_class: "giftbox-title",
                        set_label: "Surprise! Your gift is here.",
                        #[watch]
                        set_visible: model.phase != Phase::Idle,
                    },

                    gtk::Button {
                        add_css_class: "giftbox-reset",
                        set_label: "Reset",
                        set_halign: gtk::Align::Center,
                        #[watch]
                        set_visible: model.phase == Phase::Revealed,
                        connect_clicked => AppMsg::Reset,
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let motion_source = {
            let sender = sender.clone();
            MotionSource::subscribe(move |reduced| sender.input(AppMsg::MotionChanged(reduced)))
        };

        let controller = build_controller(&config, motion_source.system_reduced());
        let snapshot = Rc::new(RefCell::new(controller.snapshot()));

        let model = AppModel {
            phase: controller.phase(),
            controller: Rc::new(RefCell::new(controller)),
            snapshot,
            assets: Rc::new(RefCell::new(Assets::load(&config.assets))),
            config,
            motion_source,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            last_frame: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let snapshot_draw = model.snapshot.clone();
        let assets_draw = model.assets.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = unbox::draw(
                    cr,
                    &snapshot_draw.borrow(),
                    (width as f64, height as f64),
                    &assets_draw.borrow(),
                    &colors,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        {
            let sender = sender.clone();
            widgets.drawing_area.add_tick_callback(move |_, clock| {
                sender.input(AppMsg::Frame(clock.frame_time()));
                glib::ControlFlow::Continue
            });
        }
        widgets.drawing_area.grab_focus();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Pointer(point) => {
                let layout = BoxLayout::fit(
                    self.drawing_area.width() as f64,
                    self.drawing_area.height() as f64,
                );
                if !layout.contains(point) {
                    return;
                }
                let response = self.controller.borrow_mut().handle_input(Input::Pointer);
                self.apply(response.outcome);
            }
            AppMsg::Key(key) => {
                let response = self.controller.borrow_mut().handle_input(Input::Key(key));
                self.apply(response.outcome);
            }
            AppMsg::Activate => {
                let outcome = self.controller.borrow_mut().activate();
                self.apply(outcome);
            }
            AppMsg::Reset => {
                let outcome = self.controller.borrow_mut().reset();
                self.apply(outcome);
            }
            AppMsg::Frame(frame_time) => {
                let dt = self
                    .last_frame
                    .map(|prev| Duration::from_micros(frame_time.saturating_sub(prev).max(0) as u64))
                    .unwrap_or_default();
                self.last_frame = Some(frame_time);

                let outcome = self.controller.borrow_mut().advance(dt);
                self.apply(outcome);
            }
            AppMsg::MotionChanged(system_reduced) => {
                let motion = self.config.motion.preference.resolve(system_reduced);
                let outcome = self.controller.borrow_mut().set_motion(motion);
                self.apply(outcome);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.reconfigure(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Close => self.root.close(),
        }
    }
}

impl AppModel {
    /// Publishes a fresh snapshot for the renderer when the outcome asks for it.
    fn apply(&mut self, outcome: Outcome) {
        for (at, signal) in &outcome.signals {
            log::trace!("{:>8.3}s {:?}", at.as_secs_f64(), signal);
        }

        let controller = self.controller.borrow();
        self.phase = controller.phase();
        if outcome.should_redraw {
            let snapshot = controller.snapshot();
            let previous_epoch = self.snapshot.borrow().burst_epoch;
            if snapshot.burst_epoch != previous_epoch {
                log::debug!(
                    "Dropping burst {} from the render snapshot, now at {}",
                    previous_epoch,
                    snapshot.burst_epoch
                );
            }
            *self.snapshot.borrow_mut() = snapshot;
            self.drawing_area.queue_draw();
        }
    }

    fn reconfigure(&mut self, new_config: Config) {
        let outcome = {
            let mut controller = self.controller.borrow_mut();
            controller.set_shake_period(new_config.shake.period());
            controller.set_generator(BurstGenerator::new(new_config.confetti.brand.clone()));
            if new_config.audio != self.config.audio {
                controller.set_cue_player(audio::open_player(
                    new_config.audio.enabled,
                    new_config.audio.volume,
                ));
            }
            controller.set_motion(
                new_config
                    .motion
                    .preference
                    .resolve(self.motion_source.system_reduced()),
            )
        };

        if new_config.assets != self.config.assets {
            *self.assets.borrow_mut() = Assets::load(&new_config.assets);
        }
        self.config = new_config;

        self.apply(outcome);
        *self.snapshot.borrow_mut() = self.controller.borrow().snapshot();
        self.drawing_area.queue_draw();
    }
}
