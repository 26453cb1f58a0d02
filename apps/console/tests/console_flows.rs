//! End-to-end menu flows against an in-memory database.

use chrono::NaiveDate;

use gameshop_console::frontend::{self, Frontend};
use gameshop_console::state::Clock;
use gameshop_console::{AppContext, ScriptedConsole, ShopConfig};
use gameshop_core::{Customer, Game, ListingType, Money, Platform};
use gameshop_db::{Database, DbConfig};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

async fn setup() -> (Database, Game, Game) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let rental = Game::new(
        "God of War Ragnarok",
        "Action",
        Platform::Ps5,
        ListingType::Rental,
        Money::from_cents(1000),
    );
    let sale = Game::new(
        "Elden Ring",
        "RPG",
        Platform::Ps5,
        ListingType::Sale,
        Money::from_cents(2000),
    );
    db.games().insert(&rental).await.unwrap();
    db.games().insert(&sale).await.unwrap();

    (db, rental, sale)
}

fn context(db: &Database, today: NaiveDate) -> AppContext {
    AppContext::new(&db.stores(), ShopConfig::default()).with_clock(Clock::Fixed(today))
}

async fn customer(db: &Database, contact: &str) -> Customer {
    db.customers()
        .find_by_contact(contact)
        .await
        .unwrap()
        .expect("customer exists")
}

async fn is_available(db: &Database, game: &Game) -> bool {
    db.games()
        .get_by_id(&game.id)
        .await
        .unwrap()
        .unwrap()
        .is_available
}

#[tokio::test]
async fn test_new_customer_registers_and_rents_for_a_week() {
    let (db, rental, sale) = setup().await;
    let ctx = context(&db, day(1));
    let mut console = ScriptedConsole::new([
        "600111222", "Alice", "hunter2", // register
        "1", "5", "1", "2", "yes", // rent PS5 game for a week
        "5", // quit
    ]);

    frontend::launch(Frontend::Customer, &ctx, &mut console)
        .await
        .unwrap();

    assert!(console.contains("Registration OK. Welcome Alice!"));
    assert!(console.contains("2) 1 week - 59.50€"));
    assert!(console.contains("Total: 59.50€"));
    assert!(console.contains("Return date: 2024-06-08"));
    assert!(console.contains("Earned 595 loyalty points! Balance: 595"));
    assert!(console.contains("Goodbye."));

    assert_eq!(customer(&db, "600111222").await.loyalty_points, 595);
    assert!(!is_available(&db, &rental).await);
    assert!(is_available(&db, &sale).await);
}

#[tokio::test]
async fn test_on_time_return_earns_bonus() {
    let (db, rental, _) = setup().await;
    let ctx = context(&db, day(1));
    let mut console = ScriptedConsole::new([
        "600111222", "Alice", "hunter2",
        "1", "5", "1", "1", "yes", // rent for a day: 10.00, +100
        "2", "1", // return it the same day
        "5",
    ]);

    frontend::launch(Frontend::Customer, &ctx, &mut console)
        .await
        .unwrap();

    assert!(console.contains("Bonus: +50 loyalty points for returning on time! Balance: 150"));
    assert_eq!(customer(&db, "600111222").await.loyalty_points, 150);
    assert!(is_available(&db, &rental).await);
}

#[tokio::test]
async fn test_late_return_earns_nothing() {
    let (db, rental, _) = setup().await;

    let mut console = ScriptedConsole::new([
        "600111222", "Alice", "hunter2",
        "1", "5", "1", "1", "yes",
        "5",
    ]);
    frontend::launch(Frontend::Customer, &context(&db, day(1)), &mut console)
        .await
        .unwrap();

    let mut console = ScriptedConsole::new([
        "600111222", "hunter2", // log in
        "2", "1", // return five days late
        "5",
    ]);
    frontend::launch(Frontend::Customer, &context(&db, day(6)), &mut console)
        .await
        .unwrap();

    assert!(console.contains("Login successful. Welcome Alice!"));
    assert!(console.contains("God of War Ragnarok returned (late)"));
    assert!(!console.contains("Bonus"));
    assert_eq!(customer(&db, "600111222").await.loyalty_points, 100);
    assert!(is_available(&db, &rental).await);
}

#[tokio::test]
async fn test_purchase_with_points() {
    let (db, _, sale) = setup().await;
    let ctx = context(&db, day(1));
    let alice = ctx
        .accounts
        .register_customer("Alice", "600111222", "hunter2")
        .await
        .unwrap();
    db.customers()
        .update_loyalty_points(&alice.id, 150)
        .await
        .unwrap();

    let mut console = ScriptedConsole::new([
        "600111222", "hunter2",
        "3", "5", "1", "yes", "yes", // buy Elden Ring using 100 points
        "5",
    ]);
    frontend::launch(Frontend::Customer, &ctx, &mut console)
        .await
        .unwrap();

    assert!(console.contains("You can use 100 points for a 10.00€ discount"));
    assert!(console.contains("Total: 10.00€"));
    assert!(console.contains("Earned 100 loyalty points! Balance: 150"));
    assert_eq!(customer(&db, "600111222").await.loyalty_points, 150);
    assert!(!is_available(&db, &sale).await);
}

#[tokio::test]
async fn test_failed_points_write_after_purchase_is_reported_as_recorded() {
    let (db, _, sale) = setup().await;
    let ctx = context(&db, day(1));
    let alice = ctx
        .accounts
        .register_customer("Alice", "600111222", "hunter2")
        .await
        .unwrap();
    db.customers()
        .update_loyalty_points(&alice.id, 300)
        .await
        .unwrap();

    sqlx::query(
        "CREATE TRIGGER lock_points BEFORE UPDATE OF loyalty_points ON customers \
         BEGIN SELECT RAISE(ABORT, 'points ledger locked'); END",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let mut console = ScriptedConsole::new([
        "600111222", "hunter2",
        "3", "5", "1", "yes", "yes", // buy Elden Ring using all 300 points
        "5",
    ]);
    frontend::launch(Frontend::Customer, &ctx, &mut console)
        .await
        .unwrap();

    assert!(console.contains("ERROR The sale was recorded, but game availability or loyalty points could not be updated."));
    assert!(!console.contains("Nothing was changed"));
    assert!(!console.contains("Purchase successful!"));
    assert!(console.contains("Goodbye."));

    assert_eq!(ctx.shop.revenue().await.unwrap().sales_count, 1);
    assert!(!is_available(&db, &sale).await);
    assert_eq!(customer(&db, "600111222").await.loyalty_points, 300);
}

#[tokio::test]
async fn test_cancelled_rental_changes_nothing() {
    let (db, rental, _) = setup().await;
    let ctx = context(&db, day(1));
    let mut console = ScriptedConsole::new([
        "600111222", "Alice", "hunter2",
        "1", "5", "1", "3", "no",
        "5",
    ]);

    frontend::launch(Frontend::Customer, &ctx, &mut console)
        .await
        .unwrap();

    assert!(console.contains("Rental cancelled"));
    assert!(is_available(&db, &rental).await);
    assert_eq!(customer(&db, "600111222").await.loyalty_points, 0);
    assert!(ctx.shop.active_rentals(&customer(&db, "600111222").await).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_menu_input_keeps_session() {
    let (db, _, _) = setup().await;
    let ctx = context(&db, day(1));
    let mut console = ScriptedConsole::new([
        "600111222", "Alice", "hunter2",
        "abc", "9", " 2 ", // not a number, out of range, return with nothing rented
        "1", "3", // rent on Xbox Series S: nothing there
        "4", // log out
        "exit",
    ]);

    frontend::launch(Frontend::Customer, &ctx, &mut console)
        .await
        .unwrap();

    assert!(console.contains("ERROR Please enter a number"));
    assert!(console.contains("ERROR Invalid choice"));
    assert!(console.contains("ERROR No active rentals"));
    assert!(console.contains("ERROR No games available for this platform"));
    assert!(console.contains("Logging out..."));
    assert!(console.contains("Goodbye."));
}

#[tokio::test]
async fn test_three_wrong_passwords_return_to_start() {
    let (db, _, _) = setup().await;
    let ctx = context(&db, day(1));
    ctx.accounts
        .register_customer("Alice", "600111222", "hunter2")
        .await
        .unwrap();

    let mut console = ScriptedConsole::new(["600111222", "a", "b", "c", "exit"]);
    frontend::launch(Frontend::Customer, &ctx, &mut console)
        .await
        .unwrap();

    assert!(console.contains("Incorrect password. Attempt 3/3"));
    assert!(console.contains("Authentication failed. Back to start."));
    assert_eq!(console.remaining(), 0);
}

#[tokio::test]
async fn test_registration_errors_are_reported() {
    let (db, _, _) = setup().await;
    let ctx = context(&db, day(1));
    let mut console = ScriptedConsole::new(["phone-me", "Alice", "hunter2", "exit"]);

    frontend::launch(Frontend::Customer, &ctx, &mut console)
        .await
        .unwrap();

    assert!(console.contains("contact number has invalid format"));
    assert!(ctx.accounts.list_customers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_closed_input_ends_session() {
    let (db, _, _) = setup().await;
    let ctx = context(&db, day(1));
    let mut console = ScriptedConsole::new(["600111222", "Alice", "hunter2", "1"]);

    let err = frontend::launch(Frontend::Customer, &ctx, &mut console)
        .await
        .unwrap_err();
    assert!(err.is_input_closed());
}

#[tokio::test]
async fn test_employee_serves_customer_and_views_revenue() {
    let (db, rental, sale) = setup().await;
    let ctx = context(&db, day(1));
    ctx.accounts
        .register_employee("Shop Admin", "admin@gameshop.local", "admin")
        .await
        .unwrap();

    let mut console = ScriptedConsole::new([
        "ADMIN@gameshop.local", "admin",
        "1", "2", "Bob", "600333444", "pw", // add a customer
        "2", "5", "1", "yes", // buy Elden Ring (20.00)
        "1", "5", "1", "1", "no", "yes", // rent for a day (10.00), keep the 200 points
        "4", // view rentals
        "5", // back
        "2", // all customers
        "3", // revenue
        "4", // logout
        "exit",
    ]);

    frontend::launch(Frontend::Employee, &ctx, &mut console)
        .await
        .unwrap();

    assert!(console.contains("Welcome, Shop Admin!"));
    assert!(console.contains("Customer created successfully!"));
    assert!(console.contains("- God of War Ragnarok | Rented: 2024-06-01 | Due: 2024-06-02 | Paid: 10.00€ | Status: Active"));
    assert!(console.contains("- Bob | Phone: 600333444 | Loyalty Points: 300"));
    assert!(console.contains("Sales Revenue: 20.00€"));
    assert!(console.contains("Rental Revenue: 10.00€"));
    assert!(console.contains("Total Transactions: 2"));
    assert!(console.contains("Logging out..."));

    assert!(!is_available(&db, &rental).await);
    assert!(!is_available(&db, &sale).await);
}

#[tokio::test]
async fn test_employee_lookup_of_unknown_customer() {
    let (db, _, _) = setup().await;
    let ctx = context(&db, day(1));
    ctx.accounts
        .register_employee("Shop Admin", "admin@gameshop.local", "admin")
        .await
        .unwrap();

    let mut console = ScriptedConsole::new([
        "admin@gameshop.local", "admin",
        "1", "1", "000000", // search for nobody
        "4",
        "exit",
    ]);

    frontend::launch(Frontend::Employee, &ctx, &mut console)
        .await
        .unwrap();

    assert!(console.contains("ERROR Customer not found"));
}

#[tokio::test]
async fn test_employee_login_gives_up_after_three_attempts() {
    let (db, _, _) = setup().await;
    let ctx = context(&db, day(1));
    ctx.accounts
        .register_employee("Shop Admin", "admin@gameshop.local", "admin")
        .await
        .unwrap();

    let mut console = ScriptedConsole::new([
        "admin@gameshop.local", "nope",
        "nobody@gameshop.local", "admin",
        "admin@gameshop.local", "wrong",
        "exit",
    ]);

    frontend::launch(Frontend::Employee, &ctx, &mut console)
        .await
        .unwrap();

    assert!(console.contains("ERROR Invalid credentials. Attempt 3/3"));
    assert!(console.contains("ERROR Login failed"));
    assert!(!console.contains("Welcome, Shop Admin!"));
}
