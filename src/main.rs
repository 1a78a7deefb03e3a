use std::io::{self, stdout};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    execute,
    style::SetBackgroundColor,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use minifb::{Key, Scale, Window, WindowOptions};
use rand::Rng;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use lagometer::{
    create_clap_command, render::term, Color, DisplayTarget, Lagometer, LagometerOptions,
};

fn main() -> io::Result<()> {
    let matches = create_clap_command().get_matches();

    let mut options = LagometerOptions::default();
    if let Some(width) = matches.get_one::<usize>("width") {
        options.size[0] = (*width).max(1);
    }
    if let Some(height) = matches.get_one::<usize>("height") {
        options.size[1] = (*height).max(1);
    }
    if let Some(max) = matches.get_one::<f64>("max") {
        options.max = *max;
    }
    if let Some(font) = matches.get_one::<String>("font") {
        options.font.path = Some(font.into());
    }

    if let Some(path) = matches.get_one::<String>("screenshot") {
        let frames = *matches
            .get_one::<u32>("frames")
            .expect("frames has a default");
        let _ = TermLogger::init(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        );
        return run_screenshot(options, path, frames);
    }

    let target = match matches.get_one::<String>("mode").map(String::as_str) {
        Some("terminal") | Some("t") => DisplayTarget::Terminal,
        _ => DisplayTarget::Window,
    };
    match target {
        DisplayTarget::Window => run_window(options),
        DisplayTarget::Terminal => run_terminal(options),
    }
}

/// A few milliseconds of simulated per-frame work, occasionally spiking past
/// the default 34ms plot range so the off-canvas behavior is visible too.
fn simulated_work_ms(rng: &mut impl Rng) -> u64 {
    if rng.gen_ratio(1, 40) {
        rng.gen_range(30..60)
    } else {
        rng.gen_range(2..9)
    }
}

fn run_window(options: LagometerOptions) -> io::Result<()> {
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let mut meter = Lagometer::new(options);
    let [width, height] = meter.pixel_size();
    let mut window = Window::new(
        "Lagometer",
        width,
        height,
        WindowOptions {
            resize: false,
            scale: Scale::X2,
            ..WindowOptions::default()
        },
    )
    .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

    info!("window demo: {width}x{height} device pixels, Esc or Q quits");

    let frame_duration = Duration::from_millis(16);
    let mut rng = rand::thread_rng();
    let mut last_frame = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) && !window.is_key_down(Key::Q) {
        meter.on_cycle_start();
        thread::sleep(Duration::from_millis(simulated_work_ms(&mut rng)));
        meter.on_cycle_end();

        let pixels = meter.draw();
        window
            .update_with_buffer(pixels, width, height)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

        // pace the loop so the wait track shows the imposed inter-frame delay
        let elapsed = last_frame.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
        last_frame = Instant::now();
    }
    Ok(())
}

fn run_terminal(mut options: LagometerOptions) -> io::Result<()> {
    // log lines would fight the ANSI frame, so they go to a file here
    if let Ok(file) = std::fs::File::create("lagometer.log") {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    }

    // one block character per device pixel: halve the cell grid to get
    // logical units, and leave the readout off (no font in a terminal)
    let (cols, rows) = terminal::size()?;
    options.size = [(cols as usize / 2).max(10), (rows as usize / 2).max(5)];
    options.font.path = None;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    execute!(
        stdout(),
        EnterAlternateScreen,
        Hide,
        SetBackgroundColor(Color::BLACK.to_crossterm_color()),
    )?;

    let mut meter = Lagometer::new(options);
    let frame_budget = Duration::from_millis(33);
    let mut rng = rand::thread_rng();

    let result = loop {
        meter.on_cycle_start();
        thread::sleep(Duration::from_millis(simulated_work_ms(&mut rng)));
        meter.on_cycle_end();

        meter.draw();
        if let Err(err) = term::present(meter.canvas(), &mut stdout()) {
            break Err(err);
        }

        // the poll doubles as frame pacing
        if event::poll(frame_budget)? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    break Ok(());
                }
            }
        }
    };

    restore_terminal()?;
    result
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), Show, LeaveAlternateScreen)
}

/// Headless: drive a simulated 60Hz session on an explicit clock and save
/// the final frame as a PNG.
fn run_screenshot(options: LagometerOptions, path: &str, frames: u32) -> io::Result<()> {
    let mut meter = Lagometer::new(options);
    let mut rng = rand::thread_rng();

    let mut now = 0.0;
    for _ in 0..frames {
        meter.on_cycle_start_at(now);
        let work = simulated_work_ms(&mut rng) as f64;
        meter.on_cycle_end_at(now + work);
        now += 16.67;
    }

    let pixels = meter.draw().to_vec();
    let [width, height] = meter.pixel_size();
    let mut image = image::RgbaImage::new(width as u32, height as u32);
    for (i, px) in pixels.iter().enumerate() {
        let x = (i % width) as u32;
        let y = (i / width) as u32;
        image.put_pixel(
            x,
            y,
            image::Rgba([(px >> 16) as u8, (px >> 8) as u8, *px as u8, 0xFF]),
        );
    }
    image
        .save(path)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

    info!(
        "wrote {width}x{height} screenshot of {} simulated frames (fps {:.1}) to {path}",
        frames,
        meter.fps(lagometer::FPS_WINDOW)
    );
    Ok(())
}
