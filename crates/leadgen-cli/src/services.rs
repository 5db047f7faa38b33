use crate::context::CliContext;

/// Print the service catalog.
pub(crate) fn run_services(ctx: &CliContext) {
    for offer in &ctx.catalog {
        println!("{:<7}{} ({})", offer.id, offer.title, offer.price);
        println!("       {}", offer.description);
        for feature in &offer.features {
            println!("       - {feature}");
        }
        println!();
    }
}
