use hypr_caption::Cue;

pub struct Args {
    /// A single cue as JSON, e.g. `{"start":0,"end":1,"text":"hi","words":[...]}`.
    pub cue: String,
    pub text: String,
}

/// Preview what saving `text` would do to a cue, without touching storage.
pub fn run(args: Args) -> anyhow::Result<()> {
    let cue: Cue = serde_json::from_str(&args.cue)?;
    let reflowed = hypr_caption::reflow(&cue, &args.text);
    println!("{}", serde_json::to_string_pretty(&reflowed)?);
    Ok(())
}
