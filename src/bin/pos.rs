use clap::{App, Arg, ArgMatches};
use std::io::{self, BufRead, Write};
use std::process;

use bar_pos_client::config::ClientOptions;
use bar_pos_client::customers::CustomerLedger;
use bar_pos_client::error::Error;
use bar_pos_client::modal::{Modal, TerminalSurface};
use bar_pos_client::orders::OrderDraft;
use bar_pos_client::render;
use bar_pos_client::shifts::{ShiftBrowser, ShiftController};
use bar_pos_client::types::PaymentMethod;
use bar_pos_client::PosClient;
use tracing_subscriber::EnvFilter;

fn cli() -> App<'static> {
    App::new("pos")
        .version("0.2.0")
        .about("Terminal front end for the bar point-of-sale server")
        .arg(
            Arg::new("server")
                .long("server")
                .value_name("URL")
                .help("Point-of-sale server address")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::new("user")
                .short('u')
                .long("user")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .takes_value(true)
                .global(true),
        )
        .subcommand(App::new("login").about("Check the credentials"))
        .subcommand(
            App::new("customers")
                .about("Customer ledger")
                .subcommand(App::new("add").arg(Arg::new("name").required(true)))
                .subcommand(App::new("delete").arg(Arg::new("name").required(true)))
                .subcommand(App::new("pay").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            App::new("shifts")
                .about("Shift history")
                .arg(Arg::new("page").long("page").takes_value(true))
                .arg(
                    Arg::new("expand")
                        .long("expand")
                        .value_name("SHIFT_ID")
                        .takes_value(true),
                ),
        )
        .subcommand(
            App::new("shift")
                .about("Current shift")
                .subcommand(App::new("status"))
                .subcommand(App::new("start").arg(Arg::new("bartender").required(true)))
                .subcommand(App::new("end")),
        )
        .subcommand(
            App::new("order")
                .about("Orders")
                .subcommand(App::new("cancel").arg(Arg::new("id").required(true)))
                .subcommand(App::new("restore").arg(Arg::new("id").required(true)))
                .subcommand(
                    App::new("log")
                        .arg(
                            Arg::new("payment")
                                .long("payment")
                                .takes_value(true)
                                .default_value("cash"),
                        )
                        .arg(Arg::new("customer").long("customer").takes_value(true))
                        .arg(
                            Arg::new("items")
                                .value_name("NAME:PRICE[:QTY]")
                                .multiple_values(true)
                                .required(true),
                        ),
                ),
        )
        .subcommand(App::new("inventory").about("Product stock"))
}

fn prompt(label: &str) -> Result<String, Error> {
    read_answer(label, &mut io::stdin().lock(), &mut io::stdout())
}

fn read_answer<R: BufRead, W: Write>(label: &str, input: &mut R, output: &mut W) -> Result<String, Error> {
    write!(output, "{}: ", label).map_err(Error::general)?;
    output.flush().map_err(Error::general)?;
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(Error::general)?;
    if read == 0 {
        return Err(Error::general(format!("stdin closed while reading {}", label)));
    }
    Ok(line.trim().to_string())
}

fn parse_item(raw: &str) -> Result<(String, f64, u32), Error> {
    let mut parts = raw.split(':');
    let name = parts.next().unwrap_or_default().to_string();
    let price = parts
        .next()
        .and_then(|p| p.replace(',', ".").parse::<f64>().ok())
        .ok_or_else(|| Error::validation(format!("Chybí cena položky: {}", raw)))?;
    let quantity = match parts.next() {
        Some(q) => q
            .parse::<u32>()
            .map_err(|_| Error::validation(format!("Neplatné množství: {}", raw)))?,
        None => 1,
    };
    Ok((name, price, quantity))
}

async fn run(matches: ArgMatches) -> Result<(), Error> {
    let mut options = ClientOptions::from_env()?;
    if let Some(server) = matches.value_of("server") {
        options = options.with_server_endpoint(server);
    }

    let pos = PosClient::new_with_options(options.clone())?;
    let modal = Modal::new(TerminalSurface::new(), options.modal_fade);

    let user = match matches.value_of("user") {
        Some(user) => user.to_string(),
        None => prompt("Uživatel")?,
    };
    let password = match matches.value_of("password") {
        Some(password) => password.to_string(),
        None => prompt("Heslo")?,
    };
    let session = match pos.auth().sign_in(&user, &password) {
        Ok(session) => session,
        Err(e) => {
            modal.error(e.to_string()).await;
            return Err(e);
        }
    };

    match matches.subcommand() {
        Some(("login", _)) | None => {
            println!("Přihlášen jako {}, pokračujte do: {}", session.username, session.redirect_to);
        }
        Some(("customers", sub)) => {
            let mut ledger = CustomerLedger::new(pos.customers(), options.ledger_concurrency);
            match sub.subcommand() {
                Some(("add", args)) => ledger.add_customer(args.value_of("name").unwrap_or_default(), &modal).await?,
                Some(("delete", args)) => {
                    ledger.refresh(&modal).await?;
                    ledger.delete_customer(args.value_of("name").unwrap_or_default(), &modal).await?;
                }
                Some(("pay", args)) => {
                    ledger.refresh(&modal).await?;
                    ledger.pay(args.value_of("name").unwrap_or_default(), &modal).await?;
                }
                _ => ledger.refresh(&modal).await?,
            }
            println!("{}", ledger.render());
        }
        Some(("shifts", sub)) => {
            let page = match sub.value_of("page") {
                Some(p) => p
                    .parse::<u32>()
                    .map_err(|_| Error::validation(format!("Neplatná strana: {}", p)))?,
                None => 1,
            };
            let mut browser = ShiftBrowser::new(pos.shifts(), pos.orders(), pos.inventory(), options.page_limit);
            browser.show_page(page, &modal).await?;
            if let Some(id) = sub.value_of("expand") {
                if browser.toggle(id).is_none() {
                    modal.error(format!("Směna {} není na této straně", id)).await;
                }
            }
            println!("{}", browser.render());
        }
        Some(("shift", sub)) => {
            let mut controller = ShiftController::new(pos.shifts(), pos.orders());
            controller.refresh(&modal).await?;
            match sub.subcommand() {
                Some(("start", args)) => {
                    controller.start_shift(args.value_of("bartender").unwrap_or_default(), &modal).await?
                }
                Some(("end", _)) => {
                    controller.end_shift(&modal).await?;
                }
                _ => {}
            }
            println!("{}", controller.render());
        }
        Some(("order", sub)) => {
            let mut browser = ShiftBrowser::new(pos.shifts(), pos.orders(), pos.inventory(), options.page_limit);
            match sub.subcommand() {
                Some(("cancel", args)) => {
                    browser.cancel_order(args.value_of("id").unwrap_or_default(), &modal).await?;
                    println!("{}", browser.render());
                }
                Some(("restore", args)) => {
                    browser.restore_order(args.value_of("id").unwrap_or_default(), &modal).await?;
                    println!("{}", browser.render());
                }
                Some(("log", args)) => {
                    let mut controller = ShiftController::new(pos.shifts(), pos.orders());
                    controller.refresh(&modal).await?;

                    let mut draft = OrderDraft::new();
                    for raw in args.values_of("items").into_iter().flatten() {
                        let (name, price, quantity) = parse_item(raw)?;
                        draft.add(&name, price, quantity)?;
                    }
                    let payment: PaymentMethod = args.value_of("payment").unwrap_or("cash").parse()?;
                    let total = draft.total();
                    controller
                        .log_order(&mut draft, payment, args.value_of("customer"), &modal)
                        .await?;
                    println!("Objednávka uložena: {}", bar_pos_client::customers::format_price(total));
                }
                _ => println!("{}", cli().render_usage()),
            }
        }
        Some(("inventory", _)) => {
            let products = pos.inventory().products().await?;
            println!("{}", render::products_table(&products));
        }
        Some((other, _)) => {
            return Err(Error::general(format!("Unknown command: {}", other)));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let matches = cli().get_matches();
    if let Err(e) = run(matches).await {
        eprintln!("{}", e);
        if e.is_local() {
            tracing::debug!(error = %e, "command rejected");
        } else {
            tracing::error!(error = %e, "command failed");
        }
        process::exit(1);
    }
}
