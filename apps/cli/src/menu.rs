//! # Menu Shell
//!
//! The interactive loop: show the menu, run one action, pause, repeat.
//!
//! ## Action Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  run()                                                                  │
//! │   │                                                                     │
//! │   ├── print menu                                                        │
//! │   ├── read choice (0-10)                                                │
//! │   │     ├── 0          → "Goodbye!", return                             │
//! │   │     ├── 1..=10     → action                                         │
//! │   │     │                 └── domain error? print "Error: ..."          │
//! │   │     └── otherwise  → "Invalid choice"                               │
//! │   └── "Press Enter to continue..."                                      │
//! │                                                                         │
//! │  End of input at any prompt ends the loop without an error.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;

use stockroom_core::{Inventory, InventoryResult, Product, ProductType};
use stockroom_store::InventoryFile;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::prompt::{
    parse_expiry_date, parse_price, parse_stock, parse_warranty_years, Prompter, ShellError,
    ShellResult,
};

const MENU: &str = "\
\n=== Inventory Management System ===
1. Add Product
2. Remove Product
3. Search Products
4. List All Products
5. Sell Product
6. Restock Product
7. Remove Expired Products
8. Save Inventory
9. Load Inventory
10. Show Total Inventory Value
0. Exit
===================================";

const TYPE_OPTIONS: [&str; 3] = ["Electronics", "Grocery", "Clothing"];

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
    Search,
    List,
    Sell,
    Restock,
    SweepExpired,
    Save,
    Load,
    TotalValue,
    Exit,
}

impl Action {
    /// Maps a menu number to its action.
    pub fn from_choice(choice: u8) -> Option<Self> {
        let action = match choice {
            0 => Action::Exit,
            1 => Action::Add,
            2 => Action::Remove,
            3 => Action::Search,
            4 => Action::List,
            5 => Action::Sell,
            6 => Action::Restock,
            7 => Action::SweepExpired,
            8 => Action::Save,
            9 => Action::Load,
            10 => Action::TotalValue,
            _ => return None,
        };
        Some(action)
    }
}

// =============================================================================
// Shell
// =============================================================================

/// The interactive shell around one [`Inventory`].
pub struct Shell<R, W> {
    inventory: Inventory,
    config: AppConfig,
    prompt: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(config: AppConfig, input: R, output: W) -> Self {
        Shell {
            inventory: Inventory::new(),
            config,
            prompt: Prompter::new(input, output),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Gives back the inventory and the output writer.
    pub fn into_parts(self) -> (Inventory, W) {
        let (_, output) = self.prompt.into_parts();
        (self.inventory, output)
    }

    /// Loads the configured inventory file if enabled.
    ///
    /// A missing file is skipped quietly. Any other failure is printed to the
    /// operator and the shell starts empty.
    pub fn load_on_start(&mut self) -> ShellResult<()> {
        if !self.config.load_on_start {
            return Ok(());
        }

        let path = self.config.inventory_file.clone();
        match self.inventory.load_from_file(&path) {
            Ok(count) => {
                info!(path = %path.display(), count, "Startup inventory loaded");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                debug!(path = %path.display(), "No inventory file yet, starting empty");
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Startup load failed, starting empty");
                self.prompt.say(format!(
                    "\nError loading inventory from {}: {}\nStarting with an empty inventory.",
                    path.display(),
                    err
                ))
            }
        }
    }

    /// Runs the menu until the operator exits or input ends.
    pub fn run(&mut self) -> ShellResult<()> {
        match self.menu_loop() {
            Err(ShellError::Eof) => {
                info!("Input closed, leaving shell");
                Ok(())
            }
            other => other,
        }
    }

    fn menu_loop(&mut self) -> ShellResult<()> {
        loop {
            self.prompt.say(MENU)?;
            let answer = self.prompt.ask("\nEnter your choice (0-10): ")?;

            match answer.parse::<u8>().ok().map(Action::from_choice) {
                Some(Some(Action::Exit)) => {
                    self.prompt.say("\nGoodbye!")?;
                    return Ok(());
                }
                Some(Some(action)) => self.perform(action)?,
                Some(None) => self.prompt.say("\nInvalid choice. Please try again.")?,
                None => self.prompt.say("\nPlease enter a number")?,
            }

            self.prompt.ask("\nPress Enter to continue...")?;
        }
    }

    /// Runs one action. Domain errors are printed; only prompt failures
    /// propagate.
    pub fn perform(&mut self, action: Action) -> ShellResult<()> {
        match action {
            Action::Add => self.add_product(),
            Action::Remove => self.remove_product(),
            Action::Search => self.search_products(),
            Action::List => self.list_products(),
            Action::Sell => self.sell_product(),
            Action::Restock => self.restock_product(),
            Action::SweepExpired => self.remove_expired(),
            Action::Save => self.save_inventory(),
            Action::Load => self.load_inventory(),
            Action::TotalValue => self.show_total_value(),
            Action::Exit => Ok(()),
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    fn add_product(&mut self) -> ShellResult<()> {
        let product_type = ProductType::ALL[self.prompt.choose("Select product type:", &TYPE_OPTIONS)?];

        let mut product_id = self.prompt.ask("Enter product ID (blank to generate): ")?;
        if product_id.is_empty() {
            product_id = Uuid::new_v4().to_string();
            self.prompt.say(format!("Generated product ID: {}", product_id))?;
        }
        let name = self.prompt.ask("Enter product name: ")?;
        let price = self.prompt.ask_until("Enter price: ", parse_price)?;
        let stock = self.prompt.ask_until("Enter quantity in stock: ", parse_stock)?;

        let product = match product_type {
            ProductType::Electronics => {
                let warranty = self
                    .prompt
                    .ask_until("Enter warranty years: ", parse_warranty_years)?;
                let brand = self.prompt.ask("Enter brand: ")?;
                Product::electronics(product_id, name, price, stock, warranty, brand)
            }
            ProductType::Grocery => {
                let expiry = self
                    .prompt
                    .ask_until("Enter expiry date (YYYY-MM-DD): ", parse_expiry_date)?;
                Product::grocery(product_id, name, price, stock, expiry)
            }
            ProductType::Clothing => {
                let size = self.prompt.ask("Enter size: ")?;
                let material = self.prompt.ask("Enter material: ")?;
                Product::clothing(product_id, name, price, stock, size, material)
            }
        };

        let added = product.and_then(|product| {
            let name = product.name().to_string();
            self.inventory.add(product).map(|_| name)
        });
        self.report(added.map(|name| {
            format!("\nSuccessfully added {} product: {}", product_type, name)
        }))
    }

    fn remove_product(&mut self) -> ShellResult<()> {
        let product_id = self.prompt.ask("\nEnter product ID to remove: ")?;
        let result = self
            .inventory
            .remove(&product_id)
            .map(|_| format!("\nSuccessfully removed product {}", product_id));
        self.report(result)
    }

    fn search_products(&mut self) -> ShellResult<()> {
        let found: Vec<Product> = match self.prompt.choose("Search by:", &["Name", "Type"])? {
            0 => {
                let fragment = self.prompt.ask("Enter product name to search: ")?;
                self.inventory
                    .search_by_name(&fragment)
                    .into_iter()
                    .cloned()
                    .collect()
            }
            _ => {
                let index = self.prompt.choose("Select product type:", &TYPE_OPTIONS)?;
                self.inventory
                    .search_by_type(ProductType::ALL[index])
                    .into_iter()
                    .cloned()
                    .collect()
            }
        };

        self.print_products(&found, "No products found")
    }

    fn list_products(&mut self) -> ShellResult<()> {
        let all: Vec<Product> = self.inventory.list_all().into_iter().cloned().collect();
        self.print_products(&all, "No products in inventory")
    }

    fn sell_product(&mut self) -> ShellResult<()> {
        let product_id = self.prompt.ask("\nEnter product ID: ")?;
        let quantity = self.prompt.ask_number("Enter quantity to sell: ")?;

        let result = self.inventory.sell(&product_id, quantity).map(|total| {
            format!(
                "\nSuccessfully sold {} items\nTotal sale value: {}",
                quantity,
                total.format_with(&self.config.currency_symbol)
            )
        });
        self.report(result)
    }

    fn restock_product(&mut self) -> ShellResult<()> {
        let product_id = self.prompt.ask("\nEnter product ID: ")?;
        let quantity = self.prompt.ask_number("Enter quantity to add: ")?;

        let result = self
            .inventory
            .restock(&product_id, quantity)
            .map(|_| format!("\nSuccessfully restocked {} items", quantity));
        self.report(result)
    }

    fn remove_expired(&mut self) -> ShellResult<()> {
        let removed = self.inventory.sweep_expired();
        if removed.is_empty() {
            return self.prompt.say("\nNo expired products found");
        }

        info!(count = removed.len(), "Expired products swept");
        self.prompt
            .say(format!("\nRemoved {} expired products:", removed.len()))?;
        for product_id in removed {
            self.prompt.say(format!("- {}", product_id))?;
        }
        Ok(())
    }

    fn save_inventory(&mut self) -> ShellResult<()> {
        let path = self.ask_file("\nEnter filename to save to")?;
        match self.inventory.save_to_file(&path) {
            Ok(()) => self
                .prompt
                .say(format!("\nSuccessfully saved inventory to {}", path.display())),
            Err(err) => self.prompt.say(format!("\nError saving inventory: {}", err)),
        }
    }

    fn load_inventory(&mut self) -> ShellResult<()> {
        let path = self.ask_file("\nEnter filename to load from")?;
        match self.inventory.load_from_file(&path) {
            Ok(_) => self
                .prompt
                .say(format!("\nSuccessfully loaded inventory from {}", path.display())),
            Err(err) => self.prompt.say(format!("\nError loading inventory: {}", err)),
        }
    }

    fn show_total_value(&mut self) -> ShellResult<()> {
        let result = self.inventory.total_value().map(|total| {
            format!(
                "\nTotal inventory value: {}",
                total.format_with(&self.config.currency_symbol)
            )
        });
        self.report(result)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Asks for a file name; blank picks the configured file.
    fn ask_file(&mut self, label: &str) -> ShellResult<PathBuf> {
        let default = self.config.inventory_file.clone();
        let answer = self
            .prompt
            .ask(&format!("{} [{}]: ", label, default.display()))?;

        Ok(if answer.is_empty() {
            default
        } else {
            PathBuf::from(answer)
        })
    }

    fn print_products(&mut self, products: &[Product], empty: &str) -> ShellResult<()> {
        if products.is_empty() {
            return self.prompt.say(format!("\n{}", empty));
        }

        self.prompt
            .say(format!("\nFound {} products:", products.len()))?;
        for product in products {
            let block = product.display_with(&self.config.currency_symbol).to_string();
            self.prompt.say(format!("\n{}", block))?;
        }
        Ok(())
    }

    fn report(&mut self, result: InventoryResult<String>) -> ShellResult<()> {
        match result {
            Ok(message) => self.prompt.say(message),
            Err(err) => self.prompt.say(format!("\nError: {}", err)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use stockroom_core::Money;

    type TestShell = Shell<Cursor<Vec<u8>>, Vec<u8>>;

    fn shell_with(config: AppConfig, script: &str) -> TestShell {
        Shell::new(config, Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn shell(script: &str) -> TestShell {
        shell_with(AppConfig::default(), script)
    }

    fn finish(shell: TestShell) -> (Inventory, String) {
        let (inventory, output) = shell.into_parts();
        (inventory, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_action_numbers() {
        assert_eq!(Action::from_choice(0), Some(Action::Exit));
        assert_eq!(Action::from_choice(1), Some(Action::Add));
        assert_eq!(Action::from_choice(10), Some(Action::TotalValue));
        assert_eq!(Action::from_choice(11), None);
    }

    #[test]
    fn test_exit_says_goodbye() {
        let mut s = shell("0\n");
        s.run().unwrap();
        let (_, out) = finish(s);
        assert!(out.contains("1. Add Product"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_eof_ends_cleanly() {
        let mut s = shell("4\n");
        assert!(s.run().is_ok());
        let (_, out) = finish(s);
        assert!(out.contains("No products in inventory"));
        assert!(out.contains("Press Enter to continue..."));
    }

    #[test]
    fn test_bad_menu_choices() {
        let mut s = shell("42\n\nabc\n\n0\n");
        s.run().unwrap();
        let (_, out) = finish(s);
        assert!(out.contains("Invalid choice. Please try again."));
        assert!(out.contains("Please enter a number"));
    }

    #[test]
    fn test_add_sell_restock_session() {
        let script = "\
1\n1\nE1\nLaptop\n100\n5\n2\nAcme\n\n\
5\nE1\n2\n\n\
5\nE1\n10\n\n\
6\nE1\n4\n\n\
10\n\n\
0\n";
        let mut s = shell(script);
        s.run().unwrap();
        let (inventory, out) = finish(s);

        assert!(out.contains("Successfully added Electronics product: Laptop"));
        assert!(out.contains("Successfully sold 2 items\nTotal sale value: Rs.200.00"));
        assert!(out.contains("Error: Cannot sell 10 items of product E1. Only 3 available."));
        assert!(out.contains("Successfully restocked 4 items"));
        assert!(out.contains("Total inventory value: Rs.700.00"));
        assert_eq!(inventory.get("E1").unwrap().quantity_in_stock(), 7);
    }

    #[test]
    fn test_add_reasks_invalid_fields() {
        // grocery: bad price twice, negative stock, bad date
        let script = "2\nG1\nMilk\nfree\n0\n1.50\n-3\n12\n20/10/2030\n2030-10-20\n";
        let mut s = shell(script);
        s.perform(Action::Add).unwrap();
        let (inventory, out) = finish(s);

        assert!(out.contains("Invalid price: Price must be positive"));
        assert!(out.contains("Invalid quantity: Quantity cannot be negative"));
        assert!(out.contains("Invalid date format. Please use YYYY-MM-DD"));

        let milk = inventory.get("G1").unwrap();
        assert_eq!(milk.price(), Money::from_cents(150));
        assert_eq!(milk.quantity_in_stock(), 12);
        assert_eq!(milk.product_type(), ProductType::Grocery);
    }

    #[test]
    fn test_blank_id_is_generated() {
        let mut s = shell("3\n\nJacket\n49.99\n2\nL\nWool\n");
        s.perform(Action::Add).unwrap();
        let (inventory, out) = finish(s);

        assert!(out.contains("Generated product ID: "));
        let jacket = inventory.list_all()[0];
        assert!(Uuid::parse_str(jacket.product_id()).is_ok());
    }

    #[test]
    fn test_duplicate_and_missing_ids_are_reported() {
        let script = "3\nC1\nShirt\n10\n1\nM\nCotton\n3\nC1\nSocks\n2\n1\nS\nWool\nZZ\n";
        let mut s = shell(script);
        s.perform(Action::Add).unwrap();
        s.perform(Action::Add).unwrap();
        s.perform(Action::Remove).unwrap();
        let (inventory, out) = finish(s);

        assert!(out.contains("Error: Product with ID C1 already exists in inventory."));
        assert!(out.contains("Error: Product with ID ZZ not found in inventory."));
        assert_eq!(inventory.get("C1").unwrap().name(), "Shirt");
    }

    #[test]
    fn test_search_by_name_and_type() {
        let script = "\
3\nC1\nBlue Shirt\n10\n1\nM\nCotton\n\
1\nE1\nShirt Printer\n99\n1\n1\nInk\n\
1\nshirt\n\
2\n3\n";
        let mut s = shell(script);
        s.perform(Action::Add).unwrap();
        s.perform(Action::Add).unwrap();
        s.perform(Action::Search).unwrap();
        let (_, out) = finish(s);
        assert!(out.contains("Found 2 products:"));

        let mut s = shell("2\n2\n");
        s.perform(Action::Search).unwrap();
        let (_, out) = finish(s);
        assert!(out.contains("No products found"));
    }

    #[test]
    fn test_currency_symbol_is_configurable() {
        let config = AppConfig {
            currency_symbol: "$".to_string(),
            ..AppConfig::default()
        };
        let mut s = shell_with(config, "3\nC1\nHat\n12.5\n2\nM\nFelt\n");
        s.perform(Action::Add).unwrap();
        s.perform(Action::List).unwrap();
        s.perform(Action::TotalValue).unwrap();
        let (_, out) = finish(s);

        assert!(out.contains("Price: $12.50"));
        assert!(out.contains("Total inventory value: $25.00"));
    }

    #[test]
    fn test_remove_expired_lists_ids() {
        let script = "2\nG1\nOld Bread\n2\n1\n2000-01-01\n2\nG2\nNew Bread\n2\n1\n2999-01-01\n";
        let mut s = shell(script);
        s.perform(Action::Add).unwrap();
        s.perform(Action::Add).unwrap();
        s.perform(Action::SweepExpired).unwrap();
        s.perform(Action::SweepExpired).unwrap();
        let (inventory, out) = finish(s);

        assert!(out.contains("Removed 1 expired products:\n- G1"));
        assert!(out.contains("No expired products found"));
        assert!(inventory.contains("G2"));
        assert!(!inventory.contains("G1"));
    }

    #[test]
    fn test_save_and_load_use_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            inventory_file: dir.path().join("stock.json"),
            ..AppConfig::default()
        };

        let mut s = shell_with(config.clone(), "3\nC1\nHat\n12.5\n2\nM\nFelt\n\n");
        s.perform(Action::Add).unwrap();
        s.perform(Action::Save).unwrap();
        let (_, out) = finish(s);
        assert!(out.contains("Successfully saved inventory to"));

        let mut s = shell_with(config.clone(), "\n");
        s.perform(Action::Load).unwrap();
        assert!(s.inventory().contains("C1"));

        let mut s = shell_with(config, "");
        s.load_on_start().unwrap();
        assert_eq!(s.inventory().len(), 1);
    }

    #[test]
    fn test_load_on_start_without_file_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            inventory_file: dir.path().join("absent.json"),
            ..AppConfig::default()
        };

        let mut s = shell_with(config, "");
        s.load_on_start().unwrap();
        let (inventory, out) = finish(s);

        assert!(inventory.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_load_on_start_reports_rejected_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.json");
        std::fs::write(
            &path,
            r#"{"products": [{"product_id": "F1", "name": "Chair", "price": 5.0,
                "quantity_in_stock": 1, "type": "Furniture"}]}"#,
        )
        .unwrap();
        let config = AppConfig {
            inventory_file: path,
            ..AppConfig::default()
        };

        let mut s = shell_with(config, "");
        s.load_on_start().unwrap();
        let (inventory, out) = finish(s);

        assert!(out.contains("Error loading inventory from "));
        assert!(out.contains("Unknown product type: Furniture"));
        assert!(out.contains("Starting with an empty inventory."));
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_total_value_overflow_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.json");
        std::fs::write(
            &path,
            r#"{"products": [
                {"product_id": "E1", "name": "Mainframe", "price": 10000000000000.0,
                 "quantity_in_stock": 5000, "type": "Electronics", "warranty_years": 1, "brand": "Big"},
                {"product_id": "E2", "name": "Mainframe", "price": 10000000000000.0,
                 "quantity_in_stock": 5000, "type": "Electronics", "warranty_years": 1, "brand": "Big"}
            ]}"#,
        )
        .unwrap();

        let mut s = shell(&format!("{}\n", path.display()));
        s.perform(Action::Load).unwrap();
        s.perform(Action::TotalValue).unwrap();
        let (inventory, out) = finish(s);

        assert_eq!(inventory.len(), 2);
        assert!(out.contains("Error: Invalid argument: total inventory value is too large"));
        assert!(!out.contains("Total inventory value:"));
    }

    #[test]
    fn test_load_error_keeps_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(
            &bad,
            r#"{"products": [{"product_id": "F1", "name": "Chair", "price": 5.0,
                "quantity_in_stock": 1, "type": "Furniture"}]}"#,
        )
        .unwrap();

        let script = format!("3\nC1\nHat\n12.5\n2\nM\nFelt\n{}\n", bad.display());
        let mut s = shell(&script);
        s.perform(Action::Add).unwrap();
        s.perform(Action::Load).unwrap();
        let (inventory, out) = finish(s);

        assert!(out.contains("Error loading inventory: Invalid product data: Unknown product type: Furniture"));
        assert!(inventory.contains("C1"));
    }
}
