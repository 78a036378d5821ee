//! `ComputeClient` implementation on `aws_sdk_ec2::Client`

use crate::convert;
use crate::error::{api_error, incomplete};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::config::Region as SdkRegion;
use aws_sdk_ec2::primitives::Blob;
use aws_sdk_ec2::types::{
    InstanceType, OfferingTypeValues, ResourceType, RiProductDescription, TagSpecification,
};
use base64::Engine;
use ec2flow_compute::{
    AvailabilityZone, ComputeClient, Filter, Instance, InstanceStateChange, InstanceStatus,
    IpPermission, KeyPair, OfferingQuery, Page, Region, ReservedInstancesOffering, Result,
    RunRequest, SecurityGroup, Sequencer, Tag, TagDescription,
};

/// How to build the SDK client
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Falls back to the SDK's region chain (AWS_REGION, profile) when unset
    pub region: Option<String>,
    /// Named profile from the shared AWS config files
    pub profile: Option<String>,
    /// Endpoint override (e.g. a local EC2-compatible emulator)
    pub endpoint_url: Option<String>,
    /// Bound on pages fetched by the list helpers
    pub max_pages: Option<usize>,
}

impl ConnectOptions {
    pub fn region(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..Self::default()
        }
    }
}

/// EC2 compute client
#[derive(Debug, Clone)]
pub struct Ec2 {
    client: Client,
    sequencer: Sequencer,
}

impl Ec2 {
    /// Load SDK configuration (credentials, region, retry policy) and build a client
    pub async fn connect(options: &ConnectOptions) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &options.region {
            loader = loader.region(SdkRegion::new(region.clone()));
        }
        if let Some(profile) = &options.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(url) = &options.endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let config = loader.load().await;

        tracing::debug!("EC2 client configured (region: {:?})", config.region());

        let ec2 = Self::from_client(Client::new(&config));
        match options.max_pages {
            Some(max) => ec2.with_max_pages(max),
            None => ec2,
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            sequencer: Sequencer::new(),
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.sequencer = Sequencer::with_max_pages(max_pages);
        self
    }

    /// Same credentials and settings, another region
    pub fn at(&self, region: impl Into<String>) -> Self {
        let config = self
            .client
            .config()
            .to_builder()
            .region(SdkRegion::new(region.into()))
            .build();
        Self {
            client: Client::from_conf(config),
            sequencer: self.sequencer,
        }
    }

    pub fn region(&self) -> Option<&str> {
        self.client.config().region().map(|r| r.as_ref())
    }

    /// Underlying SDK client, for calls the facade does not wrap
    pub fn sdk(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ComputeClient for Ec2 {
    fn name(&self) -> &str {
        "aws-ec2"
    }

    fn sequencer(&self) -> Sequencer {
        self.sequencer
    }

    async fn describe_instances_page(
        &self,
        ids: &[String],
        filters: &[Filter],
        token: Option<String>,
    ) -> Result<Page<Instance>> {
        tracing::debug!("DescribeInstances (ids: {:?}, token: {:?})", ids, token);
        let out = self
            .client
            .describe_instances()
            .set_instance_ids(convert::id_list(ids))
            .set_filters(convert::sdk_filters(filters))
            .set_next_token(token)
            .send()
            .await
            .map_err(|e| api_error("DescribeInstances", e))?;

        let items = out
            .reservations()
            .iter()
            .flat_map(|r| r.instances())
            .map(convert::instance)
            .collect();
        Ok(Page::new(items, out.next_token().map(str::to_string)))
    }

    async fn run_instances(&self, request: &RunRequest) -> Result<Vec<Instance>> {
        request.validate()?;

        let mut req = self
            .client
            .run_instances()
            .image_id(&request.image_id)
            .instance_type(InstanceType::from(request.instance_type.as_str()))
            .min_count(request.min_count)
            .max_count(request.max_count)
            .set_key_name(request.key_name.clone())
            .set_subnet_id(request.subnet_id.clone())
            .set_security_group_ids(convert::id_list(&request.security_group_ids));

        if let Some(user_data) = &request.user_data {
            req = req.user_data(base64::engine::general_purpose::STANDARD.encode(user_data));
        }
        if !request.tags.is_empty() {
            req = req.tag_specifications(
                TagSpecification::builder()
                    .resource_type(ResourceType::Instance)
                    .set_tags(Some(convert::sdk_tags(&request.tags)))
                    .build(),
            );
        }

        let out = req
            .send()
            .await
            .map_err(|e| api_error("RunInstances", e))?;

        tracing::info!(
            "RunInstances: launched {} instance(s) of {} from {}",
            out.instances().len(),
            request.instance_type,
            request.image_id
        );
        Ok(out.instances().iter().map(convert::instance).collect())
    }

    async fn start_instances(&self, ids: &[String]) -> Result<Vec<InstanceStateChange>> {
        tracing::info!("StartInstances: {:?}", ids);
        let out = self
            .client
            .start_instances()
            .set_instance_ids(Some(ids.to_vec()))
            .send()
            .await
            .map_err(|e| api_error("StartInstances", e))?;
        Ok(out
            .starting_instances()
            .iter()
            .map(convert::state_change)
            .collect())
    }

    async fn stop_instances(
        &self,
        ids: &[String],
        force: bool,
    ) -> Result<Vec<InstanceStateChange>> {
        tracing::info!("StopInstances: {:?} (force: {})", ids, force);
        let out = self
            .client
            .stop_instances()
            .set_instance_ids(Some(ids.to_vec()))
            .force(force)
            .send()
            .await
            .map_err(|e| api_error("StopInstances", e))?;
        Ok(out
            .stopping_instances()
            .iter()
            .map(convert::state_change)
            .collect())
    }

    async fn terminate_instances(&self, ids: &[String]) -> Result<Vec<InstanceStateChange>> {
        tracing::info!("TerminateInstances: {:?}", ids);
        let out = self
            .client
            .terminate_instances()
            .set_instance_ids(Some(ids.to_vec()))
            .send()
            .await
            .map_err(|e| api_error("TerminateInstances", e))?;
        Ok(out
            .terminating_instances()
            .iter()
            .map(convert::state_change)
            .collect())
    }

    async fn reboot_instances(&self, ids: &[String]) -> Result<()> {
        tracing::info!("RebootInstances: {:?}", ids);
        self.client
            .reboot_instances()
            .set_instance_ids(Some(ids.to_vec()))
            .send()
            .await
            .map_err(|e| api_error("RebootInstances", e))?;
        Ok(())
    }

    async fn describe_key_pairs(&self, names: &[String]) -> Result<Vec<KeyPair>> {
        tracing::debug!("DescribeKeyPairs (names: {:?})", names);
        let out = self
            .client
            .describe_key_pairs()
            .set_key_names(convert::id_list(names))
            .send()
            .await
            .map_err(|e| api_error("DescribeKeyPairs", e))?;
        Ok(out.key_pairs().iter().map(convert::key_pair).collect())
    }

    async fn create_key_pair(&self, name: &str) -> Result<KeyPair> {
        tracing::info!("CreateKeyPair: {}", name);
        let out = self
            .client
            .create_key_pair()
            .key_name(name)
            .send()
            .await
            .map_err(|e| api_error("CreateKeyPair", e))?;
        Ok(convert::created_key_pair(&out))
    }

    async fn import_key_pair(&self, name: &str, public_key: &[u8]) -> Result<KeyPair> {
        tracing::info!("ImportKeyPair: {}", name);
        let out = self
            .client
            .import_key_pair()
            .key_name(name)
            .public_key_material(Blob::new(public_key.to_vec()))
            .send()
            .await
            .map_err(|e| api_error("ImportKeyPair", e))?;
        Ok(convert::imported_key_pair(&out))
    }

    async fn delete_key_pair(&self, name: &str) -> Result<()> {
        tracing::info!("DeleteKeyPair: {}", name);
        self.client
            .delete_key_pair()
            .key_name(name)
            .send()
            .await
            .map_err(|e| api_error("DeleteKeyPair", e))?;
        Ok(())
    }

    async fn describe_security_groups_page(
        &self,
        names: &[String],
        token: Option<String>,
    ) -> Result<Page<SecurityGroup>> {
        tracing::debug!("DescribeSecurityGroups (names: {:?}, token: {:?})", names, token);
        // group-name filter works for every VPC, unlike GroupNames
        let filters = if names.is_empty() {
            Vec::new()
        } else {
            vec![Filter::new("group-name", names.iter().cloned())]
        };
        let out = self
            .client
            .describe_security_groups()
            .set_filters(convert::sdk_filters(&filters))
            .set_next_token(token)
            .send()
            .await
            .map_err(|e| api_error("DescribeSecurityGroups", e))?;

        let items = out
            .security_groups()
            .iter()
            .map(convert::security_group)
            .collect();
        Ok(Page::new(items, out.next_token().map(str::to_string)))
    }

    async fn create_security_group(
        &self,
        name: &str,
        description: &str,
        vpc_id: Option<&str>,
    ) -> Result<String> {
        tracing::info!("CreateSecurityGroup: {}", name);
        let out = self
            .client
            .create_security_group()
            .group_name(name)
            .description(description)
            .set_vpc_id(vpc_id.map(str::to_string))
            .send()
            .await
            .map_err(|e| api_error("CreateSecurityGroup", e))?;
        out.group_id()
            .map(str::to_string)
            .ok_or_else(|| incomplete("CreateSecurityGroup", "group id"))
    }

    async fn delete_security_group(&self, group_id: &str) -> Result<()> {
        tracing::info!("DeleteSecurityGroup: {}", group_id);
        self.client
            .delete_security_group()
            .group_id(group_id)
            .send()
            .await
            .map_err(|e| api_error("DeleteSecurityGroup", e))?;
        Ok(())
    }

    async fn authorize_ingress(&self, group_id: &str, permission: &IpPermission) -> Result<()> {
        tracing::info!(
            "AuthorizeSecurityGroupIngress: {} {}/{}",
            group_id,
            permission.protocol,
            permission.port_range()
        );
        self.client
            .authorize_security_group_ingress()
            .group_id(group_id)
            .ip_permissions(convert::sdk_permission(permission))
            .send()
            .await
            .map_err(|e| api_error("AuthorizeSecurityGroupIngress", e))?;
        Ok(())
    }

    async fn revoke_ingress(&self, group_id: &str, permission: &IpPermission) -> Result<()> {
        tracing::info!(
            "RevokeSecurityGroupIngress: {} {}/{}",
            group_id,
            permission.protocol,
            permission.port_range()
        );
        self.client
            .revoke_security_group_ingress()
            .group_id(group_id)
            .ip_permissions(convert::sdk_permission(permission))
            .send()
            .await
            .map_err(|e| api_error("RevokeSecurityGroupIngress", e))?;
        Ok(())
    }

    async fn describe_tags_page(
        &self,
        filters: &[Filter],
        token: Option<String>,
    ) -> Result<Page<TagDescription>> {
        tracing::debug!("DescribeTags (token: {:?})", token);
        let out = self
            .client
            .describe_tags()
            .set_filters(convert::sdk_filters(filters))
            .set_next_token(token)
            .send()
            .await
            .map_err(|e| api_error("DescribeTags", e))?;

        let items = out.tags().iter().map(convert::tag_description).collect();
        Ok(Page::new(items, out.next_token().map(str::to_string)))
    }

    async fn create_tags(&self, resource_ids: &[String], tags: &[Tag]) -> Result<()> {
        tracing::info!("CreateTags: {:?} ({} tag(s))", resource_ids, tags.len());
        self.client
            .create_tags()
            .set_resources(Some(resource_ids.to_vec()))
            .set_tags(Some(convert::sdk_tags(tags)))
            .send()
            .await
            .map_err(|e| api_error("CreateTags", e))?;
        Ok(())
    }

    async fn delete_tags(&self, resource_ids: &[String], tags: &[Tag]) -> Result<()> {
        tracing::info!("DeleteTags: {:?} ({} tag(s))", resource_ids, tags.len());
        self.client
            .delete_tags()
            .set_resources(Some(resource_ids.to_vec()))
            .set_tags(Some(convert::sdk_tags(tags)))
            .send()
            .await
            .map_err(|e| api_error("DeleteTags", e))?;
        Ok(())
    }

    async fn describe_instance_status_page(
        &self,
        ids: &[String],
        include_all: bool,
        token: Option<String>,
    ) -> Result<Page<InstanceStatus>> {
        tracing::debug!("DescribeInstanceStatus (ids: {:?}, token: {:?})", ids, token);
        let out = self
            .client
            .describe_instance_status()
            .set_instance_ids(convert::id_list(ids))
            .include_all_instances(include_all)
            .set_next_token(token)
            .send()
            .await
            .map_err(|e| api_error("DescribeInstanceStatus", e))?;

        let items = out
            .instance_statuses()
            .iter()
            .map(convert::instance_status)
            .collect();
        Ok(Page::new(items, out.next_token().map(str::to_string)))
    }

    async fn describe_reserved_instances_offerings_page(
        &self,
        query: &OfferingQuery,
        token: Option<String>,
    ) -> Result<Page<ReservedInstancesOffering>> {
        tracing::debug!("DescribeReservedInstancesOfferings (token: {:?})", token);
        let out = self
            .client
            .describe_reserved_instances_offerings()
            .set_instance_type(query.instance_type.as_deref().map(InstanceType::from))
            .set_availability_zone(query.availability_zone.clone())
            .set_product_description(
                query
                    .product_description
                    .as_deref()
                    .map(RiProductDescription::from),
            )
            .set_offering_type(query.offering_type.as_deref().map(OfferingTypeValues::from))
            .set_include_marketplace(query.include_marketplace)
            .set_next_token(token)
            .send()
            .await
            .map_err(|e| api_error("DescribeReservedInstancesOfferings", e))?;

        let items = out
            .reserved_instances_offerings()
            .iter()
            .map(convert::offering)
            .collect();
        Ok(Page::new(items, out.next_token().map(str::to_string)))
    }

    async fn describe_regions(&self) -> Result<Vec<Region>> {
        let out = self
            .client
            .describe_regions()
            .send()
            .await
            .map_err(|e| api_error("DescribeRegions", e))?;
        Ok(out.regions().iter().map(convert::region).collect())
    }

    async fn describe_availability_zones(&self) -> Result<Vec<AvailabilityZone>> {
        let out = self
            .client
            .describe_availability_zones()
            .send()
            .await
            .map_err(|e| api_error("DescribeAvailabilityZones", e))?;
        Ok(out
            .availability_zones()
            .iter()
            .map(convert::availability_zone)
            .collect())
    }
}
