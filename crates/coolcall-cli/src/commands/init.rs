//! The `coolcall init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("coolcall.toml").exists() {
        println!("coolcall.toml already exists, skipping.");
    } else {
        std::fs::write("coolcall.toml", SAMPLE_CONFIG)?;
        println!("Created coolcall.toml");
    }

    let roster_path = std::path::Path::new("sample-roster.txt");
    if roster_path.exists() {
        println!("sample-roster.txt already exists, skipping.");
    } else {
        std::fs::write(roster_path, SAMPLE_ROSTER)?;
        println!("Created sample-roster.txt");
    }

    println!("\nNext steps:");
    println!("  1. Replace sample-roster.txt with your class list");
    println!("  2. Run: coolcall import --roster sample-roster.txt --yes");
    println!("  3. Run: coolcall start");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# coolcall configuration

# Students shown on deck at once
window_size = 4

# Fraction of the queue, from the front, that a called student
# is never reinserted into
insert_delay = 0.35

# Roster field delimiter ("\t" for tab-separated, "," for CSV)
delimiter = "\t"

# Accepted email address endings
email_suffixes = ["@uoregon.edu", "cs.uoregon.edu"]

data_dir = "./coolcall-data"
log_dir = "./coolcall-logs"
"#;

const SAMPLE_ROSTER: &str = "<first name>\t<last name>\t<ID>\t<email address>\t<phonetic spelling>\t<reveal code>
Amy\tReichhold\t951000000\tareichh2@uoregon.edu\tAY-mee\t0
Quinn\tFetrow\t951000001\tqfetrow@uoregon.edu\tkwin\t0
Derek\tMartin\t951000002\tdmartin@uoregon.edu\tDARE-ik\t0
Arden\tButterfield\t951000003\tarden@cs.uoregon.edu\tAR-den\t0
Madison\tWerries\t951000004\tmwerries@uoregon.edu\tMAD-ih-son\t0
Fatima\tPatel\t951000005\tfpatel@uoregon.edu\tFAH-tee-mah\t0
";
