use std::fmt::Write;

use hypr_caption::{
    Cue, CueSource, DisplayConstraints, Resegmenter, Unsegmented, active_cue_index,
};

use crate::runtime::VaultRuntime;

pub struct Args {
    pub job_id: String,
    pub at: Option<f64>,
    pub words: bool,
}

pub async fn run(runtime: &VaultRuntime, args: Args) -> anyhow::Result<()> {
    let cues = runtime
        .load(&args.job_id)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    if cues.is_empty() {
        eprintln!("No transcript for job {}", args.job_id);
        return Ok(());
    }

    let display = Unsegmented.resegment(&cues, &DisplayConstraints::default());
    let active = args.at.and_then(|time| active_cue_index(&display, time));
    print!("{}", render(&display, active, args.words));
    Ok(())
}

fn render(cues: &[Cue], active: Option<usize>, show_words: bool) -> String {
    let mut out = String::new();

    for (index, cue) in cues.iter().enumerate() {
        let _ = write!(out, "#{index} [{:.2} - {:.2}] {}", cue.start, cue.end, cue.text);
        if active == Some(index) {
            out.push_str("  <- now");
        }
        out.push('\n');

        if !show_words {
            continue;
        }
        for word in cue.words.iter().flatten() {
            let _ = writeln!(out, "    {:.2} - {:.2}  {}", word.start, word.end, word.text);
        }
    }

    out
}
