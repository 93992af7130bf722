use comfy_table::{Cell, Color, Table};
use goodgit_core::models::identity::Identity;

use super::Services;

pub fn run() -> anyhow::Result<()> {
    let services = Services::load()?;
    let identities = services.engine().identities()?;

    println!("{}", identity_table(&identities));
    Ok(())
}

/// One row per identity. An empty slice renders just the header.
pub fn identity_table(identities: &[Identity]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ALIAS", "USERNAME", "EMAIL", "SSH KEY"]);

    for identity in identities {
        table.add_row(vec![
            Cell::new(&identity.ssh_key).fg(Color::Cyan),
            Cell::new(&identity.username),
            Cell::new(&identity.email),
            Cell::new(identity.identity_file()),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_has_header_only() {
        let rendered = identity_table(&[]).to_string();
        assert!(rendered.contains("ALIAS"));
        assert!(rendered.contains("EMAIL"));
        assert!(!rendered.contains("~/.ssh"));
    }

    #[test]
    fn test_rows_for_identities() {
        let identities = vec![
            Identity::new("personal", "Jane", "jane@x.com").unwrap(),
            Identity::new("work", "Jane Doe", "jane@corp.com").unwrap(),
        ];
        let table = identity_table(&identities);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("jane@corp.com"));
        assert!(rendered.contains("~/.ssh/id_personal"));
    }
}
