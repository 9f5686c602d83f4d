use crate::runtime::VaultRuntime;

pub async fn run(runtime: &VaultRuntime) -> anyhow::Result<()> {
    let jobs = runtime.vault().list_jobs().await?;
    if jobs.is_empty() {
        eprintln!("No transcripts in {}", runtime.vault().base().display());
    }
    for job in jobs {
        println!("{job}");
    }
    Ok(())
}
