use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, row, scrollable, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Subscription, Task, Theme,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use trackcore::geo::distance::EARTH_RADIUS_M;
use trackcore::map_interface::{EntityTrack, GeometrySummary, Position, TrackSnapshot};

fn main() -> iced::Result {
    iced::application(MapView::boot, MapView::update, MapView::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &MapView) -> String {
    "Animal Tracker Map View".into()
}

fn application_subscription(_: &MapView) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &MapView) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct MapView {
    form: ScenarioForm,
    payload: Option<TrackPayload>,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    PayloadFetched(Result<TrackPayload, String>),
    FormFieldChanged(FormField, String),
    SubmitScenario,
    ScenarioSubmitted(Result<String, String>),
}

#[derive(Debug, Clone, Copy)]
enum FormField {
    Entities,
    CenterLat,
    CenterLng,
    Spread,
    Seed,
    Description,
}

impl MapView {
    fn boot() -> (Self, Task<Message>) {
        (
            MapView {
                form: ScenarioForm::default(),
                payload: None,
                status: "Waiting for track telemetry...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_payload(), Message::PayloadFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_payload(), Message::PayloadFetched),
            Message::PayloadFetched(Ok(payload)) => {
                let tick_changed = state
                    .payload
                    .as_ref()
                    .map(|previous| previous.snapshot.tick)
                    != Some(payload.snapshot.tick);
                state.status = format!(
                    "Tick {}: {} entities inside {:.0} m",
                    payload.snapshot.tick,
                    payload.snapshot.entity_count(),
                    payload.summary.radius_m
                );
                if tick_changed {
                    state.push_history(format!(
                        "Tick {}: radius {:.0} m around ({:.5}, {:.5})",
                        payload.snapshot.tick,
                        payload.summary.radius_m,
                        payload.summary.center.lat,
                        payload.summary.center.lng
                    ));
                }
                state.payload = Some(payload);
                Task::none()
            }
            Message::PayloadFetched(Err(err)) => {
                state.status = format!("Telemetry error: {err}");
                Task::none()
            }
            Message::FormFieldChanged(field, value) => {
                state.form.update_field(field, value);
                Task::none()
            }
            Message::SubmitScenario => {
                let payload = state.form.to_payload();
                Task::perform(post_scenario(payload), Message::ScenarioSubmitted)
            }
            Message::ScenarioSubmitted(Ok(message)) => {
                state.status = message;
                state.push_history("Scenario submitted".into());
                Task::none()
            }
            Message::ScenarioSubmitted(Err(err)) => {
                state.status = format!("Scenario error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let form_column = column![
            text("Scenario").size(26),
            text_input("Entities", &state.form.entities)
                .on_input(|value| Message::FormFieldChanged(FormField::Entities, value))
                .padding(6),
            text_input("Center latitude", &state.form.center_lat)
                .on_input(|value| Message::FormFieldChanged(FormField::CenterLat, value))
                .padding(6),
            text_input("Center longitude", &state.form.center_lng)
                .on_input(|value| Message::FormFieldChanged(FormField::CenterLng, value))
                .padding(6),
            text_input("Spread (deg)", &state.form.spread)
                .on_input(|value| Message::FormFieldChanged(FormField::Spread, value))
                .padding(6),
            text_input("Seed", &state.form.seed)
                .on_input(|value| Message::FormFieldChanged(FormField::Seed, value))
                .padding(6),
            text_input("Description", &state.form.description)
                .on_input(|value| Message::FormFieldChanged(FormField::Description, value))
                .padding(6),
            button("POST scenario")
                .on_press(Message::SubmitScenario)
                .padding(10),
            text(&state.status).size(14),
            column![
                text("Parameter definitions").size(16),
                text("Entities: number of tracked animals placed in the scenario.").size(12),
                text("Center: latitude/longitude the layout scatters around, in degrees.")
                    .size(12),
                text("Spread: maximum degrees of offset from the center for each seed.")
                    .size(12),
                text("Seed: deterministic PRNG seeding so scenarios replay consistently.")
                    .size(12),
                text("Description: free-text note echoed in the scenario reply.").size(12),
            ]
            .spacing(4)
            .padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(360.0));

        let summary_info = if let Some(payload) = &state.payload {
            text(format!(
                "Boundary: {:.0} m around ({:.5}, {:.5}) -- {}",
                payload.summary.radius_m,
                payload.summary.center.lat,
                payload.summary.center.lng,
                payload.scenario
            ))
            .size(18)
        } else {
            text("Boundary: n/a").size(18)
        };

        let track_canvas = Canvas::new(TrackMap::new(state.payload.as_ref()))
            .width(Length::Fill)
            .height(Length::Fixed(380.0));

        let fix_entries = if let Some(payload) = &state.payload {
            payload
                .snapshot
                .tracks
                .iter()
                .fold(Column::new().spacing(4), |col, track| {
                    let line = match track.latest() {
                        Some(fix) => format!(
                            "{}: {:.5}, {:.5} ({} fixes)",
                            entity_name(track.entity),
                            fix.lat,
                            fix.lng,
                            track.positions.len()
                        ),
                        None => format!("{}: no fixes", entity_name(track.entity)),
                    };
                    col.push(text(line).size(12))
                })
        } else {
            Column::new().push(text("No tracks to list").size(12))
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let telemetry_column = column![
            text("Live tracks").size(26),
            summary_info,
            text("Paddock map (paths, markers, boundary circle)").size(16),
            track_canvas,
            text("Latest fixes").size(16),
            Container::new(fix_entries).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(120.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![form_column, telemetry_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_payload() -> Result<TrackPayload, String> {
    let response = reqwest::get("http://127.0.0.1:9000/tracks")
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<TrackPayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_scenario(config: ScenarioRequest) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:9000/scenario")
        .json(&config)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok("Scenario submitted".into())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

#[derive(Debug, Clone)]
struct ScenarioForm {
    entities: String,
    center_lat: String,
    center_lng: String,
    spread: String,
    seed: String,
    description: String,
}

impl ScenarioForm {
    fn default() -> Self {
        Self {
            entities: "3".into(),
            center_lat: "16.1604".into(),
            center_lng: "74.8300".into(),
            spread: "0.0025".into(),
            seed: "0".into(),
            description: "Map view scenario".into(),
        }
    }

    fn update_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Entities => self.entities = value,
            FormField::CenterLat => self.center_lat = value,
            FormField::CenterLng => self.center_lng = value,
            FormField::Spread => self.spread = value,
            FormField::Seed => self.seed = value,
            FormField::Description => self.description = value,
        }
    }

    fn to_payload(&self) -> ScenarioRequest {
        ScenarioRequest {
            entity_count: self.entities.parse().ok(),
            center_lat: self.center_lat.parse().ok(),
            center_lng: self.center_lng.parse().ok(),
            spread_deg: self.spread.parse().ok(),
            seed: self.seed.parse().ok(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ScenarioRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    center_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    center_lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spread_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct TrackPayload {
    #[serde(default)]
    snapshot: TrackSnapshot,
    #[serde(default)]
    summary: GeometrySummary,
    #[serde(default)]
    scenario: String,
}

/// Display name attached to an entity index; presentation metadata only.
fn entity_name(index: usize) -> String {
    match index {
        0 => "Dog".to_string(),
        1 => "Cat".to_string(),
        2 => "Elephant".to_string(),
        other => format!("Animal {}", other + 1),
    }
}

fn entity_color(index: usize) -> Color {
    match index {
        0 => Color::from_rgb(0.86, 0.24, 0.22),
        1 => Color::from_rgb(0.25, 0.47, 0.90),
        2 => Color::from_rgb(0.24, 0.68, 0.33),
        _ => Color::from_rgb(0.62, 0.62, 0.62),
    }
}

#[derive(Clone)]
struct TrackMap {
    tracks: Vec<EntityTrack>,
    summary: GeometrySummary,
}

impl TrackMap {
    fn new(payload: Option<&TrackPayload>) -> Self {
        match payload {
            Some(payload) => Self {
                tracks: payload.snapshot.tracks.clone(),
                summary: payload.summary,
            },
            None => Self {
                tracks: Vec::new(),
                summary: GeometrySummary::default(),
            },
        }
    }

    /// Meters east/north of the summary center, local equirectangular frame.
    fn offset_m(&self, position: Position) -> (f64, f64) {
        let center = self.summary.center;
        let east = EARTH_RADIUS_M
            * (position.lng - center.lng).to_radians()
            * center.lat.to_radians().cos();
        let north = EARTH_RADIUS_M * (position.lat - center.lat).to_radians();
        (east, north)
    }
}

impl canvas::Program<Message> for TrackMap {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.04, 0.07, 0.05),
        );

        if self.tracks.is_empty() {
            return vec![frame.into_geometry()];
        }

        let mut extent = self.summary.radius_m.max(1.0);
        for track in &self.tracks {
            for position in &track.positions {
                let (east, north) = self.offset_m(*position);
                extent = extent.max(east.abs()).max(north.abs());
            }
        }

        let half = (bounds.width.min(bounds.height) / 2.0 - 16.0).max(1.0);
        let scale = half as f64 / extent;
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let to_screen = |position: Position| {
            let (east, north) = self.offset_m(position);
            Point::new(
                center.x + (east * scale) as f32,
                center.y - (north * scale) as f32,
            )
        };

        let radius_px = (self.summary.radius_m * scale) as f32;
        let boundary = Path::new(|builder| builder.circle(center, radius_px));
        frame.fill(&boundary, Color::from_rgba(0.55, 0.75, 0.95, 0.25));
        frame.stroke(
            &boundary,
            Stroke::default()
                .with_width(1.5)
                .with_color(Color::from_rgb(0.2, 0.4, 0.9)),
        );

        for track in &self.tracks {
            let color = entity_color(track.entity);
            if track.positions.len() > 1 {
                let path = Path::new(|builder| {
                    for (i, position) in track.positions.iter().enumerate() {
                        let point = to_screen(*position);
                        if i == 0 {
                            builder.move_to(point);
                        } else {
                            builder.line_to(point);
                        }
                    }
                });
                frame.stroke(&path, Stroke::default().with_width(2.0).with_color(color));
            }

            for position in &track.positions {
                let marker = Path::new(|builder| builder.circle(to_screen(*position), 2.5));
                frame.fill(&marker, color);
            }
            if let Some(latest) = track.latest() {
                let head = Path::new(|builder| builder.circle(to_screen(latest), 5.0));
                frame.fill(&head, color);
                frame.stroke(
                    &head,
                    Stroke::default().with_width(1.5).with_color(Color::WHITE),
                );
            }
        }

        vec![frame.into_geometry()]
    }
}
