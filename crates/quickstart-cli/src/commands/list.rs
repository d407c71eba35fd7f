//! `create-vueless list`: the variants, the templates behind them and the
//! supported package managers.

use quickstart_core::domain::{ManagerCommands, PackageManager, TemplateCatalog};

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = config.templates.catalog();

    output.header("Templates:")?;
    for line in template_lines(&catalog, &config) {
        output.data(&line)?;
    }

    output.data("")?;
    output.header("Package managers:")?;
    for line in manager_lines(&ManagerCommands::default(), &config) {
        output.data(&line)?;
    }

    Ok(())
}

fn template_lines(catalog: &TemplateCatalog, config: &AppConfig) -> Vec<String> {
    catalog
        .iter()
        .map(|(variant, template)| {
            let default = if variant == config.defaults.template {
                " (default)"
            } else {
                ""
            };
            format!(
                "  {:<3} {:<11} {}{default}",
                variant.as_str(),
                variant.title(),
                template
            )
        })
        .collect()
}

fn manager_lines(commands: &ManagerCommands, config: &AppConfig) -> Vec<String> {
    PackageManager::ALL
        .iter()
        .map(|&pm| {
            let default = if pm == config.defaults.package_manager {
                " (default)"
            } else {
                ""
            };
            format!("  {:<5} {}{default}", pm.as_str(), commands.init(pm))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_listed_typescript_first_with_default_marked() {
        let config = AppConfig::default();
        let lines = template_lines(&config.templates.catalog(), &config);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("TypeScript"));
        assert!(lines[0].contains("vueless-quickstart-ts.git#main"));
        assert!(lines[0].ends_with("(default)"));
        assert!(!lines[1].ends_with("(default)"));
    }

    #[test]
    fn managers_show_their_init_command() {
        let mut config = AppConfig::default();
        config.defaults.package_manager = PackageManager::Pnpm;
        let lines = manager_lines(&ManagerCommands::default(), &config);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "  pnpm  npx vueless init --pnpm (default)");
        assert_eq!(lines[3], "  bun   npx vueless init");
    }
}
