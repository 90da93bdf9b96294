use anyhow::Result;

use stratus_cloud::list_images;

use crate::context::ExecutionContext;
use crate::output::{color_enabled, paint_image_status};

pub fn build(ctx: &ExecutionContext, image_name: &str) -> Result<()> {
    ctx.image(image_name)?.build(ctx.config()?)?;
    Ok(())
}

pub fn delete(ctx: &ExecutionContext, image_name: &str, force: bool) -> Result<()> {
    ctx.image(image_name)?.delete(force)?;
    Ok(())
}

pub fn describe(ctx: &ExecutionContext, image_name: &str) -> Result<()> {
    let summary = ctx.image(image_name)?.describe()?;
    println!("Name:    {}", summary.name);
    println!(
        "Image:   {}",
        summary.image_id.as_deref().unwrap_or("-")
    );
    println!("Status:  {}", summary.status);
    println!("Version: {}", summary.version);
    if let Some(created) = summary.created_at {
        println!("Created: {}", created.to_rfc3339());
    }
    Ok(())
}

pub fn list(ctx: &ExecutionContext, color: bool) -> Result<()> {
    let color = color_enabled(color);
    for image in list_images(ctx.orchestrator()?)? {
        println!(
            "{:<24} {:<20} {:<10} {}",
            image.name,
            paint_image_status(image.status, color),
            image.version,
            image.image_id.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
