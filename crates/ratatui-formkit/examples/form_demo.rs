use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use log::LevelFilter;
use log::info;
use log::warn;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_formkit::crossterm_input::input_event_from_crossterm;
use ratatui_formkit::help::HelpBar;
use ratatui_formkit::input::InputEvent;
use ratatui_formkit::input::KeyCode;
use ratatui_formkit::keymap::Binding;
use ratatui_formkit::keymap::key;
use ratatui_formkit::render;
use ratatui_formkit::table::Column;
use ratatui_formkit::table::ColumnAlign;
use ratatui_formkit::table::DataTableAction;
use ratatui_formkit::table::DataTableOptions;
use ratatui_formkit::table::DataTableView;
use ratatui_formkit::table::Row;
use ratatui_formkit::text_input::InputVariant;
use ratatui_formkit::text_input::TextInput;
use ratatui_formkit::text_input::TextInputAction;
use ratatui_formkit::text_input::TextInputOptions;
use ratatui_formkit::theme::Theme;
use simplelog::Config;
use simplelog::WriteLogger;
use std::fs::File;
use std::io;
use std::time::Duration;

const USERS: &str = r#"[
    {"id": 1, "name": "Bob", "email": "bob@example.com", "role": "admin", "age": 41},
    {"id": 2, "name": "Amy", "email": "amy@example.com", "role": "editor", "age": 29},
    {"id": 3, "name": "Cid", "email": "cid@example.com", "role": "viewer", "age": null},
    {"id": 4, "name": "dana", "email": "dana@example.com", "role": "editor", "age": 35},
    {"id": 5, "name": "Eve", "email": "eve@example.com", "role": "viewer", "age": 23},
    {"id": 6, "name": "Finn", "email": "finn@example.com", "role": "admin"},
    {"id": 7, "name": "Gus", "email": "gus@example.com", "role": "viewer", "age": 52}
]"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Email,
    Password,
    Search,
    Table,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Email => Focus::Password,
            Focus::Password => Focus::Search,
            Focus::Search => Focus::Table,
            Focus::Table => Focus::Email,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Email => Focus::Table,
            Focus::Password => Focus::Email,
            Focus::Search => Focus::Password,
            Focus::Table => Focus::Search,
        }
    }
}

#[derive(Default)]
struct Areas {
    email: Rect,
    password: Rect,
    search: Rect,
    table: Rect,
}

struct App {
    users: Vec<Row>,
    email: TextInput,
    password: TextInput,
    search: TextInput,
    table: DataTableView<Row>,
    focus: Focus,
    areas: Areas,
    message: String,
}

impl App {
    fn new(users: Vec<Row>) -> Self {
        let email = TextInput::with_options(TextInputOptions {
            label: Some("Email".into()),
            placeholder: "you@example.com".into(),
            helper_text: Some("Press Enter to validate".into()),
            ..Default::default()
        });
        let password = TextInput::with_options(TextInputOptions {
            label: Some("Password".into()),
            placeholder: "at least 8 characters".into(),
            password: true,
            ..Default::default()
        });
        let search = TextInput::with_options(TextInputOptions {
            placeholder: "Filter users by name".into(),
            clearable: true,
            variant: InputVariant::Underline,
            ..Default::default()
        });

        let columns = vec![
            Column::new("id", "ID").width(4).align(ColumnAlign::End),
            Column::new("name", "Name").sortable(true),
            Column::new("email", "Email").sortable(true),
            Column::new("role", "Role").sortable(true).width(8),
            Column::new("age", "Age")
                .sortable(true)
                .width(5)
                .align(ColumnAlign::End)
                .renderer(|value, _, _| match value {
                    Some(v) if !v.is_null() => Line::from(v.to_string()),
                    _ => Line::from("-".dark_gray()),
                }),
        ];
        let mut table = DataTableView::with_options(
            columns,
            DataTableOptions {
                selectable: true,
                empty_message: "No users match".into(),
                empty_icon: Some("∅".into()),
                ..Default::default()
            },
        );
        table.set_rows(users.clone());

        let mut app = Self {
            users,
            email,
            password,
            search,
            table,
            focus: Focus::Email,
            areas: Areas::default(),
            message: String::new(),
        };
        app.set_focus(Focus::Email);
        app
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.email.set_focused(focus == Focus::Email);
        self.password.set_focused(focus == Focus::Password);
        self.search.set_focused(focus == Focus::Search);
        if focus == Focus::Table && self.table.cursor().is_none() {
            self.table.set_cursor(Some(0));
        }
    }

    fn help(&self) -> Vec<Binding> {
        let mut out = vec![Binding::new("tab", "next field", vec![key(KeyCode::Tab)])];
        match self.focus {
            Focus::Email => {}
            Focus::Password => out.extend(self.password.help()),
            Focus::Search => out.extend(self.search.help()),
            Focus::Table => out.extend(self.table.help()),
        }
        out.push(Binding::new("ctrl+c", "quit", Vec::new()));
        out
    }

    fn apply_filter(&mut self) {
        let needle = self.search.value().to_lowercase();
        let rows: Vec<Row> = self
            .users
            .iter()
            .filter(|r| {
                r.text("name")
                    .map(|n| n.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        info!("filter {:?}: {} rows", needle, rows.len());
        self.table.set_rows(rows);
    }

    fn validate_email(&mut self, value: &str) {
        if value.contains('@') {
            self.email.set_error(None);
            self.message = format!("email ok: {value}");
        } else {
            warn!("invalid email submitted");
            self.email.set_error(Some("Enter a valid email address".into()));
        }
    }

    fn validate_password(&mut self, value: &str) {
        if value.chars().count() >= 8 {
            self.password.set_error(None);
            self.message = "password accepted".into();
        } else {
            self.password
                .set_error(Some("Password must be at least 8 characters".into()));
        }
    }

    fn focus_at(&mut self, x: u16, y: u16) {
        let pos = Position::new(x, y);
        let target = [
            (self.areas.email, Focus::Email),
            (self.areas.password, Focus::Password),
            (self.areas.search, Focus::Search),
            (self.areas.table, Focus::Table),
        ]
        .into_iter()
        .find(|(area, _)| area.contains(pos))
        .map(|(_, focus)| focus);
        if let Some(focus) = target.filter(|f| *f != self.focus) {
            self.set_focus(focus);
        }
    }

    fn handle_event(&mut self, ev: InputEvent) {
        if let InputEvent::Key(k) = &ev {
            match k.code {
                KeyCode::Tab => return self.set_focus(self.focus.next()),
                KeyCode::BackTab => return self.set_focus(self.focus.prev()),
                _ => {}
            }
        }
        if let InputEvent::Mouse(m) = &ev {
            if m.is_left_click() {
                self.focus_at(m.x, m.y);
            }
        }

        match self.focus {
            Focus::Email => {
                if let TextInputAction::Submitted(v) = self.email.input(ev) {
                    self.validate_email(&v);
                }
            }
            Focus::Password => match self.password.input(ev) {
                TextInputAction::Submitted(v) => self.validate_password(&v),
                TextInputAction::VisibilityToggled(shown) => {
                    self.message = if shown {
                        "password shown".to_string()
                    } else {
                        "password hidden".to_string()
                    };
                }
                _ => {}
            },
            Focus::Search => match self.search.input(ev) {
                TextInputAction::Changed | TextInputAction::Cleared => self.apply_filter(),
                _ => {}
            },
            Focus::Table => match self.table.handle_event(ev) {
                DataTableAction::SelectionChanged => {
                    info!("selected {} users", self.table.selected_rows().len());
                }
                DataTableAction::Activated(source) => {
                    let name = self
                        .table
                        .table()
                        .rows()
                        .get(source)
                        .and_then(|r| r.text("name").ok())
                        .map(str::to_string);
                    if let Some(name) = name {
                        self.message = format!("opened {name}");
                    }
                }
                _ => {}
            },
        }
    }

    fn status(&self) -> String {
        let names: Vec<&str> = self
            .table
            .selected_rows()
            .into_iter()
            .filter_map(|r| r.text("name").ok())
            .collect();
        let selected = if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        };
        if self.message.is_empty() {
            format!("Selected: {selected}")
        } else {
            format!("Selected: {selected} | {}", self.message)
        }
    }
}

fn main() -> io::Result<()> {
    match File::create("form_demo.log") {
        Ok(file) => {
            if let Err(err) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("form_demo: logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("form_demo: cannot create form_demo.log, logging disabled: {err}"),
    }

    let users: Vec<Row> = serde_json::from_str(USERS).map_err(io::Error::other)?;
    let mut app = App::new(users);
    info!("form demo started with {} users", app.users.len());

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let res = run(&mut terminal, &theme, &mut app);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    info!("form demo exited");
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default()
                .title("ratatui-formkit (tab: focus, ctrl+c: quit)")
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let [email, password, search, table, status, help] = Layout::vertical([
                Constraint::Length(app.email.height()),
                Constraint::Length(app.password.height()),
                Constraint::Length(app.search.height()),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);
            app.areas = Areas {
                email,
                password,
                search,
                table,
            };

            let status_text = app.status();
            let help_bar = HelpBar::new(app.help());
            let buf = f.buffer_mut();
            app.email.render(email, buf, theme);
            app.password.render(password, buf, theme);
            app.search.render(search, buf, theme);
            app.table.render(table, buf, theme);
            render::render_str_clipped(
                status.x,
                status.y,
                0,
                status.width,
                buf,
                &status_text,
                theme.text_primary,
            );
            help_bar.render(help, buf, theme);

            let cursor = match app.focus {
                Focus::Email => app.email.cursor_pos(),
                Focus::Password => app.password.cursor_pos(),
                Focus::Search => app.search.cursor_pos(),
                Focus::Table => None,
            };
            if let Some((x, y)) = cursor {
                f.set_cursor_position(Position::new(x, y));
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(250))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        if let Event::Key(k) = &ev {
            if k.code == crossterm::event::KeyCode::Char('c')
                && k.modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
            {
                return Ok(());
            }
        }
        if let Some(ev) = input_event_from_crossterm(ev) {
            app.handle_event(ev);
        }
    }
}
